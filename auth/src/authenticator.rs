use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::config::SecurityConfig;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::principal::StoredCredential;
use crate::resolver::Resolver;

/// Token type reported alongside every access token.
pub const BEARER: &str = "bearer";

/// Authentication coordinator combining password verification, token
/// issuance and bearer token resolution.
///
/// Built once from the security configuration and shared by every request.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    resolver: Resolver,
    access_token_ttl: Duration,
}

/// Access token as returned by a login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: BEARER.to_string(),
        }
    }
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Access token for the authenticated user
    pub access_token: AccessToken,

    /// Fresh Argon2id hash when the stored one is outdated; the caller
    /// should persist it in place of the old hash
    pub upgraded_hash: Option<String>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Inactive user")]
    InactiveUser,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Signing secret, algorithm and default token lifetime
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            resolver: Resolver::new(TokenCodec::from_config(config)),
            access_token_ttl: config.access_token_ttl(),
        }
    }

    /// Resolver sharing this authenticator's token codec.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Default lifetime of issued access tokens.
    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify login credentials and issue an access token.
    ///
    /// # Arguments
    /// * `user` - Account found for the submitted login name, if any
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or wrong password
    /// * `InactiveUser` - Correct password for a disabled account
    /// * `PasswordError` - Stored hash is malformed
    /// * `TokenError` - Token generation failed
    pub fn authenticate<U: StoredCredential>(
        &self,
        user: Option<&U>,
        password: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let Some(user) = user else {
            // Same cost as a failed verification.
            let _ = self.password_hasher.hash(password);
            return Err(AuthenticationError::InvalidCredentials);
        };

        let is_valid = self.password_hasher.verify(password, user.password_hash())?;
        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        if !user.is_active() {
            return Err(AuthenticationError::InactiveUser);
        }

        let upgraded_hash = if self.password_hasher.needs_rehash(user.password_hash())? {
            tracing::info!(subject = %user.subject(), "Upgrading outdated password hash");
            Some(self.password_hasher.hash(password)?)
        } else {
            None
        };

        let access_token = self.issue_access_token(&user.subject())?;

        Ok(AuthenticationResult {
            access_token,
            upgraded_hash,
        })
    }

    /// Issue an access token without password verification.
    ///
    /// Useful when identity has already been established by other means.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_access_token(&self, subject: &str) -> Result<AccessToken, TokenError> {
        self.resolver
            .codec()
            .issue(subject, self.access_token_ttl)
            .map(AccessToken::bearer)
    }
}
