use thiserror::Error;

/// Why a request could not be authenticated or authorized.
///
/// This is the only failure type that leaves the resolver and the gate.
/// Token problems and unknown subjects share `InvalidCredentials` so callers
/// cannot tell a stale token from one naming a user that does not exist.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
pub enum AuthFailure {
    #[error("Could not validate credentials")]
    InvalidCredentials,

    #[error("Inactive user")]
    InactiveUser,

    #[error("The user doesn't have enough privileges")]
    InsufficientPrivilege,
}
