//! Password hashing and verification on top of the codec.
//!
//! Everything here is generic over a [`HashComputer`]; the `*_with` functions
//! take one explicitly, while the plain versions (feature `argon2id`) use
//! [`Argon2Computer`](crate::Argon2Computer) and draw salts from the OS RNG.
//!
//! ## Examples
//!
//! ```rust
//! use argon2_phc::{Config, verify_encoded};
//!
//! let config = Config::default().with_memory_cost(64).with_time_cost(1);
//! let encoded = config.hash_encoded("my-secret-password").unwrap();
//!
//! assert!(verify_encoded("my-secret-password", &encoded).unwrap());
//! assert!(!verify_encoded("wrong-password", &encoded).unwrap());
//! ```

use std::hint::black_box;

use tracing::{debug, instrument, warn};

use crate::codec::decode;
use crate::computer::HashComputer;
use crate::error::HashError;
use crate::record::{Config, HashRecord};

impl Config {
    /// Hashes `password` with an explicit `salt` using `computer`.
    ///
    /// ## Errors
    ///
    /// Returns whatever the computer reports, or
    /// [`HashError::LengthMismatch`] if it returns a digest that is not
    /// `hash_length` bytes long.
    #[instrument(
        level = "debug",
        skip_all,
        fields(variant = %self.variant, m = self.memory_cost, t = self.time_cost, p = self.parallelism)
    )]
    pub fn hash_with<C>(
        &self,
        computer: &C,
        password: impl AsRef<[u8]>,
        salt: &[u8],
    ) -> Result<HashRecord, HashError>
    where
        C: HashComputer + ?Sized,
    {
        let digest = computer.compute(password.as_ref(), salt, self)?;

        let expected = self.hash_length as usize;
        if digest.len() != expected {
            warn!(
                expected,
                actual = digest.len(),
                "Hash computer returned a digest of the wrong length"
            );
            return Err(HashError::LengthMismatch {
                expected,
                actual: digest.len(),
            });
        }

        debug!(salt_len = salt.len(), hash_len = digest.len(), "Password hashed");
        Ok(HashRecord::new(*self, salt, digest))
    }
}

impl HashRecord {
    /// Checks `password` against this record using `computer`.
    ///
    /// The digest is recomputed with the record's own salt and parameters and
    /// compared in constant time.
    #[instrument(level = "debug", skip_all, fields(variant = %self.variant()))]
    pub fn verify_with<C>(&self, computer: &C, password: impl AsRef<[u8]>) -> Result<bool, HashError>
    where
        C: HashComputer + ?Sized,
    {
        let digest = computer.compute(password.as_ref(), self.salt(), self.config())?;
        let matched = digests_match(self.hash(), &digest);
        debug!(matched, "Password verified");
        Ok(matched)
    }
}

/// Decodes `encoded` and checks `password` against it using `computer`.
///
/// ## Errors
///
/// Returns [`HashError::Decoding`] if `encoded` is not a valid hash string.
pub fn verify_encoded_with<C>(
    computer: &C,
    password: impl AsRef<[u8]>,
    encoded: impl AsRef<[u8]>,
) -> Result<bool, HashError>
where
    C: HashComputer + ?Sized,
{
    let record = decode(encoded.as_ref())?;
    record.verify_with(computer, password)
}

fn digests_match(expected: &[u8], actual: &[u8]) -> bool {
    if expected.is_empty() || expected.len() != actual.len() {
        return false;
    }
    let diff = expected
        .iter()
        .zip(actual)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));
    black_box(diff) == 0
}

#[cfg(feature = "argon2id")]
mod os {
    use rand::RngCore;
    use rand::rngs::OsRng;
    use tracing::instrument;

    use crate::computer::Argon2Computer;
    use crate::error::HashError;
    use crate::record::{Config, HashRecord};

    /// Fills a fresh buffer of `len` bytes from the OS RNG.
    pub fn generate_salt(len: u32) -> Result<Vec<u8>, HashError> {
        let mut salt = vec![0u8; len as usize];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| HashError::Salt(e.to_string()))?;
        Ok(salt)
    }

    impl Config {
        /// Hashes `password` with Argon2.
        ///
        /// When `salt` is `None` a random salt of `salt_length` bytes is
        /// generated.
        ///
        /// ## Examples
        ///
        /// ```rust
        /// use argon2_phc::{Config, Variant};
        ///
        /// let config = Config::default()
        ///     .with_variant(Variant::Argon2id)
        ///     .with_memory_cost(64)
        ///     .with_time_cost(1);
        /// let record = config.hash("password", Some(b"saltsalt".as_slice())).unwrap();
        ///
        /// assert_eq!(record.salt(), b"saltsalt");
        /// assert_eq!(record.hash().len(), 32);
        /// ```
        ///
        /// ## Errors
        ///
        /// Returns `HashError::InvalidParams` if the parameters are rejected,
        /// `HashError::Salt` if no salt could be generated and
        /// `HashError::Compute` if hashing fails.
        pub fn hash(
            &self,
            password: impl AsRef<[u8]>,
            salt: Option<&[u8]>,
        ) -> Result<HashRecord, HashError> {
            match salt {
                Some(salt) => self.hash_with(&Argon2Computer, password, salt),
                None => {
                    let salt = generate_salt(self.salt_length)?;
                    self.hash_with(&Argon2Computer, password, &salt)
                }
            }
        }

        /// Hashes `password` with a freshly generated salt.
        pub fn hash_raw(&self, password: impl AsRef<[u8]>) -> Result<HashRecord, HashError> {
            self.hash(password, None)
        }

        /// Hashes `password` with a fresh salt and returns the encoded string.
        ///
        /// ```rust
        /// use argon2_phc::Config;
        ///
        /// let encoded = Config::default().with_memory_cost(64).hash_encoded("pw").unwrap();
        /// assert!(encoded.starts_with("$argon2i$v=19$m=64,t=3,p=1$"));
        /// ```
        pub fn hash_encoded(&self, password: impl AsRef<[u8]>) -> Result<String, HashError> {
            self.hash_raw(password).map(|record| record.to_string())
        }
    }

    impl HashRecord {
        /// Checks `password` against this record with Argon2.
        pub fn verify(&self, password: impl AsRef<[u8]>) -> Result<bool, HashError> {
            self.verify_with(&Argon2Computer, password)
        }
    }

    /// Decodes `encoded` and checks `password` against it with Argon2.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::Decoding` if the hash string is malformed.
    #[instrument(level = "debug", skip_all)]
    pub fn verify_encoded(
        password: impl AsRef<[u8]>,
        encoded: impl AsRef<[u8]>,
    ) -> Result<bool, HashError> {
        super::verify_encoded_with(&Argon2Computer, password, encoded)
    }
}

#[cfg(feature = "argon2id")]
pub use os::{generate_salt, verify_encoded};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodingFailure;
    use crate::record::Variant;

    /// Deterministic stand-in that "hashes" by XOR-ing password and salt.
    struct XorComputer;

    impl HashComputer for XorComputer {
        fn compute(
            &self,
            password: &[u8],
            salt: &[u8],
            config: &Config,
        ) -> Result<Vec<u8>, HashError> {
            Ok((0..config.hash_length as usize)
                .map(|i| {
                    let p = password.get(i % password.len().max(1)).copied().unwrap_or(0);
                    let s = salt.get(i % salt.len().max(1)).copied().unwrap_or(0);
                    p ^ s ^ i as u8
                })
                .collect())
        }
    }

    /// Always returns four bytes, whatever was asked for.
    struct ShortComputer;

    impl HashComputer for ShortComputer {
        fn compute(&self, _: &[u8], _: &[u8], _: &Config) -> Result<Vec<u8>, HashError> {
            Ok(vec![1, 2, 3, 4])
        }
    }

    struct FailingComputer;

    impl HashComputer for FailingComputer {
        fn compute(&self, _: &[u8], _: &[u8], _: &Config) -> Result<Vec<u8>, HashError> {
            Err(HashError::Compute("boom".into()))
        }
    }

    fn config() -> Config {
        Config::default().with_variant(Variant::Argon2id).with_hash_length(16)
    }

    #[test]
    fn hash_with_builds_record() {
        let record = config().hash_with(&XorComputer, "password", b"saltsalt").unwrap();
        assert_eq!(record.salt(), b"saltsalt");
        assert_eq!(record.hash().len(), 16);
        assert_eq!(record.config().salt_length, 8);
        assert_eq!(record.variant(), Variant::Argon2id);
    }

    #[test]
    fn hash_with_rejects_wrong_digest_length() {
        let err = config().hash_with(&ShortComputer, "pw", b"saltsalt").unwrap_err();
        assert!(matches!(
            err,
            HashError::LengthMismatch {
                expected: 16,
                actual: 4
            }
        ));
    }

    #[test]
    fn hash_with_propagates_computer_errors() {
        let err = config().hash_with(&FailingComputer, "pw", b"saltsalt").unwrap_err();
        assert!(matches!(err, HashError::Compute(_)));
    }

    #[test]
    fn verify_with_matches_same_password() {
        let record = config().hash_with(&XorComputer, "password", b"saltsalt").unwrap();
        assert!(record.verify_with(&XorComputer, "password").unwrap());
        assert!(!record.verify_with(&XorComputer, "Password").unwrap());
    }

    #[test]
    fn verify_encoded_with_round_trips_through_codec() {
        let record = config().hash_with(&XorComputer, "password", b"saltsalt").unwrap();
        let encoded = record.to_string();
        assert!(verify_encoded_with(&XorComputer, "password", &encoded).unwrap());
        assert!(!verify_encoded_with(&XorComputer, "nope", &encoded).unwrap());
    }

    #[test]
    fn verify_encoded_with_reports_decoding_failure() {
        let err = verify_encoded_with(&XorComputer, "pw", "$argon2x$").unwrap_err();
        assert!(matches!(err, HashError::Decoding(DecodingFailure)));
    }

    #[test]
    fn verify_with_short_digest_is_false() {
        let record = config().hash_with(&XorComputer, "password", b"saltsalt").unwrap();
        assert!(!record.verify_with(&ShortComputer, "password").unwrap());
    }

    #[test]
    fn digests_match_rules() {
        assert!(digests_match(b"abc", b"abc"));
        assert!(!digests_match(b"abc", b"abd"));
        assert!(!digests_match(b"abc", b"ab"));
        assert!(!digests_match(b"", b""));
    }

    #[test]
    #[tracing_test::traced_test]
    fn hashing_emits_debug_event_without_secrets() {
        let _ = config().hash_with(&XorComputer, "hunter2", b"saltsalt").unwrap();
        assert!(logs_contain("Password hashed"));
        assert!(logs_contain("Argon2id"));
        assert!(!logs_contain("hunter2"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn wrong_digest_length_is_logged() {
        let _ = config().hash_with(&ShortComputer, "pw", b"saltsalt");
        assert!(logs_contain("wrong length"));
    }

    #[cfg(feature = "argon2id")]
    mod os_backed {
        use super::*;

        fn fast() -> Config {
            Config::default().with_memory_cost(64).with_time_cost(1)
        }

        #[test]
        fn generated_salts_have_configured_length() {
            let record = fast().with_salt_length(24).hash_raw("pw").unwrap();
            assert_eq!(record.salt().len(), 24);
        }

        #[test]
        fn random_salts_differ() {
            let a = fast().hash_encoded("same-password").unwrap();
            let b = fast().hash_encoded("same-password").unwrap();
            assert_ne!(a, b);
        }

        #[test]
        fn explicit_salt_is_deterministic() {
            let a = fast().hash("pw", Some(b"saltsalt".as_slice())).unwrap();
            let b = fast().hash("pw", Some(b"saltsalt".as_slice())).unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn verify_correct_and_incorrect() {
            let record = fast().hash_raw("correct-password").unwrap();
            assert!(record.verify("correct-password").unwrap());
            assert!(!record.verify("wrong-password").unwrap());
        }

        #[test]
        fn verify_empty_and_unicode_passwords() {
            for password in ["", "パスワード🔐"] {
                let encoded = fast().hash_encoded(password).unwrap();
                assert!(verify_encoded(password, &encoded).unwrap());
                assert!(!verify_encoded("password", &encoded).unwrap());
            }
        }

        #[test]
        fn verify_encoded_rejects_garbage() {
            let err = verify_encoded("password", "not-a-valid-hash").unwrap_err();
            assert!(matches!(err, HashError::Decoding(_)));
        }

        #[test]
        fn generate_salt_zero_length() {
            assert!(generate_salt(0).unwrap().is_empty());
        }
    }
}
