//! The in-memory form of an Argon2 hash: parameters, salt and digest.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three Argon2 flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Data-dependent memory access. Fastest and most resistant to GPU
    /// cracking, but only suitable where side-channel timing attacks are not a
    /// threat.
    Argon2d,
    /// Data-independent memory access, preferred where side channels matter.
    Argon2i,
    /// Hybrid of the two; the usual recommendation for password storage.
    Argon2id,
}

impl Variant {
    /// The text that follows `$argon2` in the encoded form.
    pub const fn suffix(self) -> &'static str {
        match self {
            Variant::Argon2d => "d",
            Variant::Argon2i => "i",
            Variant::Argon2id => "id",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Argon2d => write!(f, "Argon2d"),
            Variant::Argon2i => write!(f, "Argon2i"),
            Variant::Argon2id => write!(f, "Argon2id"),
        }
    }
}

/// Argon2 algorithm version as carried in the `v=` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u32);

impl Version {
    /// Version 0x10. Deprecated, kept for reading old hashes.
    pub const V10: Version = Version(0x10);

    /// Version 0x13. Recommended.
    pub const V13: Version = Version(0x13);

    /// Wraps a raw version number.
    pub const fn new(value: u32) -> Self {
        Version(value)
    }

    /// The raw version number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::V13
    }
}

impl From<u32> for Version {
    fn from(value: u32) -> Self {
        Version(value)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default digest length in bytes.
pub const DEFAULT_HASH_LENGTH: u32 = 32;

/// Default salt length in bytes.
pub const DEFAULT_SALT_LENGTH: u32 = 16;

/// Default number of passes over memory.
pub const DEFAULT_TIME_COST: u32 = 3;

/// Default memory cost in KiB (4 MiB).
pub const DEFAULT_MEMORY_COST_KIB: u32 = 1 << 12;

/// Default number of lanes.
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Every parameter of an Argon2 hash.
///
/// `Config` is a plain `Copy` value; share it by copying rather than by
/// mutating a shared instance. Missing fields fall back to the defaults when
/// deserializing, so a configuration file only needs the fields it changes:
///
/// ```rust
/// use argon2_phc::{Config, Variant};
///
/// let config = Config::default()
///     .with_variant(Variant::Argon2id)
///     .with_memory_cost(19 * 1024)
///     .with_time_cost(2);
///
/// assert_eq!(config.parallelism, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Length of the digest in bytes. Must be > 0.
    pub hash_length: u32,

    /// Length of generated salts in bytes. Must be > 0.
    pub salt_length: u32,

    /// Number of passes over memory. Must be > 0; use at least 3 with
    /// `Argon2i`.
    pub time_cost: u32,

    /// Memory to use, in KiB. Must be > 0.
    pub memory_cost: u32,

    /// Number of lanes (and threads). Must be > 0.
    pub parallelism: u32,

    /// Which Argon2 flavour to run.
    pub variant: Variant,

    /// Algorithm version.
    pub version: Version,
}

impl Default for Config {
    /// Server defaults: a 32 byte digest, 16 byte salt, 3 passes over 4 MiB
    /// on a single lane with `Argon2i` version 0x13.
    fn default() -> Self {
        Self {
            hash_length: DEFAULT_HASH_LENGTH,
            salt_length: DEFAULT_SALT_LENGTH,
            time_cost: DEFAULT_TIME_COST,
            memory_cost: DEFAULT_MEMORY_COST_KIB,
            parallelism: DEFAULT_PARALLELISM,
            variant: Variant::Argon2i,
            version: Version::V13,
        }
    }
}

impl Config {
    /// Sets the digest length in bytes.
    pub fn with_hash_length(mut self, hash_length: u32) -> Self {
        self.hash_length = hash_length;
        self
    }

    /// Sets the length in bytes of generated salts.
    pub fn with_salt_length(mut self, salt_length: u32) -> Self {
        self.salt_length = salt_length;
        self
    }

    /// Sets the number of passes over memory.
    pub fn with_time_cost(mut self, time_cost: u32) -> Self {
        self.time_cost = time_cost;
        self
    }

    /// Sets the memory cost in KiB.
    pub fn with_memory_cost(mut self, memory_cost: u32) -> Self {
        self.memory_cost = memory_cost;
        self
    }

    /// Sets the number of lanes.
    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Sets the Argon2 variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the algorithm version. Accepts a [`Version`] or its raw `u32`.
    pub fn with_version(mut self, version: impl Into<Version>) -> Self {
        self.version = version.into();
        self
    }
}

/// A salt and digest together with the parameters that produced them.
///
/// Records are immutable once built and can be shared freely between
/// threads. They come out of [`decode`](crate::decode) or the hashing
/// helpers, and go into [`encode`](crate::encode) or verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRecord {
    config: Config,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl HashRecord {
    /// Builds a record. `hash_length` and `salt_length` in the stored config
    /// are taken from `hash` and `salt`, not from `config`.
    pub fn new(config: Config, salt: impl Into<Vec<u8>>, hash: impl Into<Vec<u8>>) -> Self {
        let salt = salt.into();
        let hash = hash.into();
        let config = Config {
            hash_length: len_u32(hash.len()),
            salt_length: len_u32(salt.len()),
            ..config
        };
        Self { config, salt, hash }
    }

    /// The parameters, with `hash_length` and `salt_length` matching the
    /// stored buffers.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The salt bytes.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// The digest bytes.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Shorthand for `config().variant`.
    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    /// Shorthand for `config().version`.
    pub fn version(&self) -> Version {
        self.config.version
    }

    /// Splits the record into its parts.
    pub fn into_parts(self) -> (Config, Vec<u8>, Vec<u8>) {
        (self.config, self.salt, self.hash)
    }
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
