//! Guards applied to an already resolved principal.
//!
//! Both functions take the principal by value and hand back the very same
//! value on success, so they chain with `?` / `and_then`.

use crate::errors::AuthFailure;
use crate::principal::Principal;

/// Require the principal's account to be active.
///
/// Repeats the check the resolver already performs, so it is always safe to
/// call on a resolved principal.
pub fn require_active<U>(principal: Principal<U>) -> Result<Principal<U>, AuthFailure> {
    if principal.is_active() {
        Ok(principal)
    } else {
        Err(AuthFailure::InactiveUser)
    }
}

/// Require the principal to hold superuser privileges.
pub fn require_superuser<U>(principal: Principal<U>) -> Result<Principal<U>, AuthFailure> {
    if principal.is_superuser() {
        Ok(principal)
    } else {
        Err(AuthFailure::InsufficientPrivilege)
    }
}
