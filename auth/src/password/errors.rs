use thiserror::Error;

/// Error type for password operations.
///
/// Neither variant is a client-facing authentication failure: both point at
/// a broken primitive or corrupted stored data and surface as server errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
