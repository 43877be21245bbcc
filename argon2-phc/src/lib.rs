//! Canonical Argon2 hash strings.
//!
//! This crate converts Argon2 hash records to and from the standard textual
//! form used to store them:
//!
//! ```text
//! $argon2id$v=19$m=32768,t=1,p=1$c2FsdHNhbHQ$i3ZCXD8RMwu4akQl0xCL9L3ZJjV0lIutsAO27+vSS5s
//! ```
//!
//! The codec ([`encode`]/[`decode`]) never runs the hash function itself. The
//! memory-hard computation sits behind the [`HashComputer`] trait, and the
//! hashing/verification helpers compose the two.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `argon2id` | Yes | `Argon2Computer` (RustCrypto `argon2`), random salts and the plain `hash`/`verify` helpers |
//!
//! Without `argon2id` the codec and the `*_with` helpers are still available
//! for use with your own [`HashComputer`].
//!
//! ## Examples
//!
//! ```rust
//! use argon2_phc::{Config, HashRecord, Variant};
//!
//! let config = Config::default()
//!     .with_variant(Variant::Argon2id)
//!     .with_memory_cost(64)
//!     .with_time_cost(1);
//!
//! let encoded = config.hash_encoded("my-password").unwrap();
//! let record: HashRecord = encoded.parse().unwrap();
//!
//! assert_eq!(record.config().memory_cost, 64);
//! assert!(record.verify("my-password").unwrap());
//! ```

pub mod b64;
pub mod codec;
pub mod computer;
pub mod error;
pub mod hasher;
pub mod record;
pub mod scanner;

pub use codec::{decode, encode, encode_to_string, encoded_len};
pub use computer::HashComputer;
pub use error::{DecodingFailure, HashError};
pub use hasher::verify_encoded_with;
pub use record::{
    Config, DEFAULT_HASH_LENGTH, DEFAULT_MEMORY_COST_KIB, DEFAULT_PARALLELISM,
    DEFAULT_SALT_LENGTH, DEFAULT_TIME_COST, HashRecord, Variant, Version,
};

#[cfg(feature = "argon2id")]
pub use computer::Argon2Computer;

#[cfg(feature = "argon2id")]
pub use hasher::{generate_salt, verify_encoded};
