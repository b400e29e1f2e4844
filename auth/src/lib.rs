//! Authentication core library
//!
//! Provides the authentication building blocks of the backend:
//! - Password hashing (Argon2id, with verification of legacy bcrypt hashes)
//! - Access token issuance and verification (HMAC-signed JWT, `{sub, exp}` only)
//! - Bearer token resolution to an active user
//! - Active / superuser guards
//!
//! Storage and HTTP concerns stay outside: the resolver borrows a
//! [`UserLookup`] supplied by the caller and returns a [`Principal`] or an
//! [`AuthFailure`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{SignatureAlgorithm, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", SignatureAlgorithm::Hs256);
//! let token = codec.issue("user123", Duration::minutes(30)).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Resolving a Bearer Token
//! ```
//! use auth::{gate, Account, AuthFailure, Authenticator, SecurityConfig, UserLookup};
//!
//! #[derive(Debug)]
//! struct User {
//!     active: bool,
//!     superuser: bool,
//! }
//!
//! impl Account for User {
//!     fn is_active(&self) -> bool { self.active }
//!     fn is_superuser(&self) -> bool { self.superuser }
//! }
//!
//! struct Users;
//!
//! impl UserLookup for Users {
//!     type User = User;
//!
//!     fn find_by_subject(&self, subject: &str) -> Option<User> {
//!         (subject == "u1").then(|| User { active: true, superuser: false })
//!     }
//! }
//!
//! let auth = Authenticator::new(&SecurityConfig::new("secret_key_at_least_32_bytes_long!"));
//! let token = auth.issue_access_token("u1").unwrap();
//!
//! let principal = auth.resolver().resolve(&token.access_token, &Users).unwrap();
//! assert!(!principal.is_superuser());
//! assert_eq!(
//!     gate::require_superuser(principal).unwrap_err(),
//!     AuthFailure::InsufficientPrivilege
//! );
//! ```

pub mod authenticator;
pub mod config;
pub mod errors;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod principal;
pub mod resolver;

// Re-export commonly used items
pub use authenticator::AccessToken;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use self::config::SecurityConfig;
pub use self::config::SignatureAlgorithm;
pub use errors::AuthFailure;
pub use gate::require_active;
pub use gate::require_superuser;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::HashScheme;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use principal::Account;
pub use principal::Principal;
pub use principal::StoredCredential;
pub use resolver::Resolver;
pub use resolver::UserLookup;
