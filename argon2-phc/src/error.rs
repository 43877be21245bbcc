use thiserror::Error;

/// The one error produced while decoding an encoded hash string.
///
/// Every structural, numeric and base64 problem collapses into this single
/// outcome; callers learn only that the string was rejected, not which field
/// was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to decode argon2 hash string")]
pub struct DecodingFailure;

/// Errors that can occur while hashing or verifying a password.
#[derive(Debug, Error)]
pub enum HashError {
    /// The hash computer rejected the configured parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// The hash computation itself failed.
    #[error("failed to hash password: {0}")]
    Compute(String),

    /// A random salt could not be generated.
    #[error("failed to generate salt: {0}")]
    Salt(String),

    /// The encoded hash string could not be decoded.
    #[error(transparent)]
    Decoding(#[from] DecodingFailure),

    /// A hash computer returned a digest of the wrong size.
    #[error("digest length mismatch (expected {expected} bytes, got {actual})")]
    LengthMismatch {
        /// Length requested through `Config::hash_length`.
        expected: usize,
        /// Length actually returned.
        actual: usize,
    },
}
