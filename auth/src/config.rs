use std::env;
use std::fmt;
use std::str::FromStr;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Minimum accepted length of the signing secret, in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Default access token lifetime: eight days.
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60 * 24 * 8;

/// HMAC signature algorithm used for access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignatureAlgorithm {
    #[default]
    Hs256,
    Hs384,
    Hs512,
}

impl SignatureAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Hs256 => "HS256",
            SignatureAlgorithm::Hs384 => "HS384",
            SignatureAlgorithm::Hs512 => "HS512",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(SignatureAlgorithm::Hs256),
            "HS384" => Ok(SignatureAlgorithm::Hs384),
            "HS512" => Ok(SignatureAlgorithm::Hs512),
            other => Err(ConfigError::Message(format!(
                "Unsupported signature algorithm: {}",
                other
            ))),
        }
    }
}

impl From<SignatureAlgorithm> for jsonwebtoken::Algorithm {
    fn from(algorithm: SignatureAlgorithm) -> Self {
        match algorithm {
            SignatureAlgorithm::Hs256 => jsonwebtoken::Algorithm::HS256,
            SignatureAlgorithm::Hs384 => jsonwebtoken::Algorithm::HS384,
            SignatureAlgorithm::Hs512 => jsonwebtoken::Algorithm::HS512,
        }
    }
}

/// Token signing configuration.
///
/// Built once at process start and handed to the token codec; nothing in
/// this crate reads it from a global.
#[derive(Deserialize, Clone)]
pub struct SecurityConfig {
    pub secret_key: String,
    #[serde(default)]
    pub algorithm: SignatureAlgorithm,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
}

fn default_access_token_expire_minutes() -> i64 {
    DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .finish()
    }
}

impl SecurityConfig {
    /// Build a configuration with the default algorithm and token lifetime.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            algorithm: SignatureAlgorithm::default(),
            access_token_expire_minutes: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        }
    }

    pub fn with_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_access_token_expire_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expire_minutes = minutes;
        self
    }

    /// Default lifetime of an access token.
    ///
    /// Saturates at `Duration::MAX` for lifetimes `validate` would reject.
    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_minutes(self.access_token_expire_minutes)
            .unwrap_or(chrono::Duration::MAX)
    }

    /// Load the `security` section from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SECURITY__SECRET_KEY, SECURITY__ALGORITHM, ...)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_config(&configuration)
    }

    /// Extract and validate the `security` section of an already built configuration.
    pub fn from_config(configuration: &ConfigBuilder) -> Result<Self, ConfigError> {
        let security: SecurityConfig = configuration.get("security")?;
        security.validate()?;
        Ok(security)
    }

    /// Reject secrets too short for HMAC and token lifetimes that are not
    /// positive or do not fit a `chrono::Duration`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "security.secret_key must be at least {} bytes, got {}",
                MIN_SECRET_LENGTH,
                self.secret_key.len()
            )));
        }

        if self.access_token_expire_minutes <= 0 {
            return Err(ConfigError::Message(format!(
                "security.access_token_expire_minutes must be positive, got {}",
                self.access_token_expire_minutes
            )));
        }

        if chrono::Duration::try_minutes(self.access_token_expire_minutes).is_none() {
            return Err(ConfigError::Message(format!(
                "security.access_token_expire_minutes is out of range, got {}",
                self.access_token_expire_minutes
            )));
        }

        Ok(())
    }
}
