//! The canonical encoded form of an Argon2 hash.
//!
//! ```text
//! $argon2<d|i|id>$v=<version>$m=<memory>,t=<time>,p=<parallelism>$<salt>$<hash>
//! ```
//!
//! Salt and digest are unpadded standard-alphabet base64. Decoding ignores the
//! optional `data` attribute of older revisions, and every malformed input is
//! reported as the same [`DecodingFailure`].
//!
//! ## Examples
//!
//! ```rust
//! use argon2_phc::{decode, encode, Variant};
//!
//! let encoded = "$argon2id$v=19$m=32768,t=1,p=1$c2FsdHNhbHQ$i3ZCXD8RMwu4akQl0xCL9L3ZJjV0lIutsAO27+vSS5s";
//! let record = decode(encoded.as_bytes()).unwrap();
//!
//! assert_eq!(record.variant(), Variant::Argon2id);
//! assert_eq!(record.salt(), b"saltsalt");
//! assert_eq!(encode(&record), encoded.as_bytes());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::b64;
use crate::error::DecodingFailure;
use crate::record::{Config, HashRecord, Variant, Version};
use crate::scanner::Scanner;

const PREFIX: &[u8] = b"$argon2";
const VERSION_KEY: &[u8] = b"v=";
const MEMORY_KEY: &[u8] = b"$m=";
const TIME_KEY: &[u8] = b",t=";
const PARALLELISM_KEY: &[u8] = b",p=";

const ENC_D: &[u8] = b"d$v=";
const ENC_I: &[u8] = b"i$v=";
const ENC_ID: &[u8] = b"id$v=";

/// Room reserved for everything except the two base64 fields:
///
/// ```text
///   7 ("$argon2") + 2 (variant)
/// + 3 ("$v=")     + 2 (version)
/// + 3 ("$m=")     + 7 (memory)
/// + 3 (",t=")     + 2 (time)
/// + 3 (",p=")     + 2 (parallelism)
/// + 1 ("$")       + 1 ("$")
/// ```
const STATIC_OVERHEAD: usize = 36;

const MAX_VERSION: u32 = 255;

/// Encodes a record into its canonical textual form.
///
/// The output is pure ASCII and can be turned into a `String` without
/// checks; see [`encode_to_string`].
///
/// # Panics
///
/// Panics if the encoded length does not fit in a `usize`.
pub fn encode(record: &HashRecord) -> Vec<u8> {
    let config = record.config();
    let salt_len = b64::encoded_len_or_panic(record.salt().len());
    let hash_len = b64::encoded_len_or_panic(record.hash().len());

    let capacity = salt_len
        .checked_add(hash_len)
        .and_then(|n| n.checked_add(STATIC_OVERHEAD))
        .unwrap_or_else(|| panic!("encoded argon2 hash length overflows usize"));
    let mut buf = Vec::with_capacity(capacity);

    let variant = match config.variant {
        Variant::Argon2d => ENC_D,
        Variant::Argon2i => ENC_I,
        Variant::Argon2id => ENC_ID,
    };

    append(&mut buf, PREFIX);
    append(&mut buf, variant);
    append_decimal(&mut buf, config.version.get());
    append(&mut buf, MEMORY_KEY);
    append_decimal(&mut buf, config.memory_cost);
    append(&mut buf, TIME_KEY);
    append_decimal(&mut buf, config.time_cost);
    append(&mut buf, PARALLELISM_KEY);
    append_decimal(&mut buf, config.parallelism);
    append(&mut buf, b"$");
    b64::append_encoded(&mut buf, record.salt());
    append(&mut buf, b"$");
    b64::append_encoded(&mut buf, record.hash());

    buf
}

/// [`encode`], returned as a `String`.
pub fn encode_to_string(record: &HashRecord) -> String {
    // literals, decimal digits and base64 only
    String::from_utf8(encode(record)).expect("encoded argon2 hash is ASCII")
}

/// Decodes a canonical Argon2 hash string.
///
/// The whole input is scanned before anything is validated; any problem,
/// wherever it occurs, yields [`DecodingFailure`]. Bytes after the digest are
/// treated as part of the digest's base64.
pub fn decode(encoded: &[u8]) -> Result<HashRecord, DecodingFailure> {
    let mut sc = Scanner::new(encoded);

    if !sc.match_literal(PREFIX) {
        return Err(DecodingFailure);
    }

    let mut mismatch = false;
    let variant = match (sc.read_byte(), sc.read_byte()) {
        (Some(b'i'), Some(b'd')) => match sc.read_byte() {
            Some(b'$') => Variant::Argon2id,
            _ => return Err(DecodingFailure),
        },
        (Some(b'i'), Some(b'$')) => Variant::Argon2i,
        (Some(b'd'), sep) => {
            mismatch |= sep != Some(b'$');
            Variant::Argon2d
        }
        _ => return Err(DecodingFailure),
    };

    mismatch |= !sc.match_literal(VERSION_KEY);
    let version = sc.parse_u32();
    mismatch |= !sc.match_literal(MEMORY_KEY);
    let memory_cost = sc.parse_u32();
    mismatch |= !sc.match_literal(TIME_KEY);
    let time_cost = sc.parse_u32();
    mismatch |= !sc.match_literal(PARALLELISM_KEY);
    let parallelism = sc.parse_u32();
    sc.skip_until(b'$');
    let salt = sc.read_slice(b'$');
    let hash = sc.read_remainder();

    let (
        false,
        Some(version @ 1..=MAX_VERSION),
        Some(memory_cost @ 1..),
        Some(time_cost @ 1..),
        Some(parallelism @ 1..),
        Some(salt),
        Some(hash),
    ) = (mismatch, version, memory_cost, time_cost, parallelism, salt, hash)
    else {
        return Err(DecodingFailure);
    };

    let salt = b64::decode(salt)?;
    let hash = b64::decode(hash)?;

    let config = Config {
        variant,
        version: Version::new(version),
        memory_cost,
        time_cost,
        parallelism,
        ..Config::default()
    };

    Ok(HashRecord::new(config, salt, hash))
}

/// Exact length of `encode(record)`.
pub fn encoded_len(record: &HashRecord) -> Option<usize> {
    let config = record.config();
    [
        PREFIX.len(),
        config.variant.suffix().len(),
        1 + VERSION_KEY.len(),
        decimal_width(config.version.get()),
        MEMORY_KEY.len(),
        decimal_width(config.memory_cost),
        TIME_KEY.len(),
        decimal_width(config.time_cost),
        PARALLELISM_KEY.len(),
        decimal_width(config.parallelism),
        2,
        b64::encoded_len(record.salt().len())?,
        b64::encoded_len(record.hash().len())?,
    ]
    .into_iter()
    .try_fold(0usize, |acc, n| acc.checked_add(n))
}

impl HashRecord {
    /// Encodes this record; see [`encode`].
    pub fn encode(&self) -> Vec<u8> {
        encode(self)
    }
}

impl fmt::Display for HashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_to_string(self))
    }
}

impl FromStr for HashRecord {
    type Err = DecodingFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for HashRecord {
    type Error = DecodingFailure;

    fn try_from(encoded: &[u8]) -> Result<Self, Self::Error> {
        decode(encoded)
    }
}

/// Makes room for `additional` more bytes, at least doubling the capacity
/// whenever the buffer has to grow.
///
/// # Panics
///
/// Panics if the required length does not fit in a `usize`.
pub(crate) fn grow(buf: &mut Vec<u8>, additional: usize) {
    let Some(needed) = buf.len().checked_add(additional) else {
        panic!("encoded argon2 hash length overflows usize");
    };
    if needed <= buf.capacity() {
        return;
    }
    let target = buf.capacity().saturating_mul(2).max(needed);
    buf.reserve_exact(target - buf.len());
}

fn append(buf: &mut Vec<u8>, bytes: &[u8]) {
    grow(buf, bytes.len());
    buf.extend_from_slice(bytes);
}

fn append_decimal(buf: &mut Vec<u8>, mut value: u32) {
    let mut digits = [0u8; 10];
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    append(buf, &digits[start..]);
}

fn decimal_width(value: u32) -> usize {
    value.checked_ilog10().map_or(1, |d| d as usize + 1)
}
