//! Axum adapter for the authentication core.
//!
//! Turns `Authorization: Bearer <token>` headers into a [`auth::Principal`]
//! stored in request extensions and maps authentication failures to HTTP
//! responses:
//!
//! | Failure | Status |
//! |---|---|
//! | missing / non-bearer header | 401 |
//! | `InvalidCredentials` | 403 |
//! | `InactiveUser` | 400 |
//! | `InsufficientPrivilege` | 403 |
//! | storage or stored-hash failure | 500 |

pub mod errors;
pub mod middleware;
pub mod ports;
pub mod state;

pub use errors::ApiError;
pub use middleware::authenticate;
pub use middleware::extract_token_from_header;
pub use middleware::require_superuser;
pub use middleware::CurrentUser;
pub use ports::UserRepository;
pub use state::AuthState;
