//! The seam between the codec and the memory-hard hash computation.

use crate::error::HashError;
use crate::record::Config;

/// Something that can run the Argon2 computation.
///
/// Implementations receive the full [`Config`] and must return a digest of
/// exactly `config.hash_length` bytes. The codec never calls this itself; it
/// is used by the hashing and verification helpers.
pub trait HashComputer {
    /// Hashes `password` with `salt` under `config`.
    fn compute(&self, password: &[u8], salt: &[u8], config: &Config) -> Result<Vec<u8>, HashError>;
}

impl<C: HashComputer + ?Sized> HashComputer for &C {
    fn compute(&self, password: &[u8], salt: &[u8], config: &Config) -> Result<Vec<u8>, HashError> {
        (**self).compute(password, salt, config)
    }
}

#[cfg(feature = "argon2id")]
pub use backend::Argon2Computer;

#[cfg(feature = "argon2id")]
mod backend {
    use argon2::{Algorithm, Argon2, Params};

    use super::HashComputer;
    use crate::error::HashError;
    use crate::record::{Config, Variant};

    /// [`HashComputer`] backed by the RustCrypto `argon2` crate.
    ///
    /// Only versions 0x10 and 0x13 can be computed; anything else is rejected
    /// as [`HashError::InvalidParams`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Argon2Computer;

    impl Argon2Computer {
        fn context(config: &Config) -> Result<Argon2<'static>, HashError> {
            let algorithm = match config.variant {
                Variant::Argon2d => Algorithm::Argon2d,
                Variant::Argon2i => Algorithm::Argon2i,
                Variant::Argon2id => Algorithm::Argon2id,
            };
            let version = argon2::Version::try_from(config.version.get())
                .map_err(|e| HashError::InvalidParams(e.to_string()))?;
            let params = Params::new(
                config.memory_cost,
                config.time_cost,
                config.parallelism,
                Some(config.hash_length as usize),
            )
            .map_err(|e| HashError::InvalidParams(e.to_string()))?;

            Ok(Argon2::new(algorithm, version, params))
        }
    }

    impl HashComputer for Argon2Computer {
        fn compute(
            &self,
            password: &[u8],
            salt: &[u8],
            config: &Config,
        ) -> Result<Vec<u8>, HashError> {
            let argon2 = Self::context(config)?;
            let mut out = vec![0u8; config.hash_length as usize];
            argon2
                .hash_password_into(password, salt, &mut out)
                .map_err(|e| HashError::Compute(e.to_string()))?;
            Ok(out)
        }
    }
}
