use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by an access token.
///
/// A token holds a subject and an absolute expiration and nothing else.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (stringified user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims expiring `ttl` from now.
    ///
    /// A zero or negative `ttl` is accepted and yields a token that is
    /// already expired, or expires within the current second. Expirations
    /// before the Unix epoch are clamped to 0.
    pub fn new(subject: impl Into<String>, ttl: Duration) -> Self {
        Self::issued_at(subject, Utc::now(), ttl)
    }

    /// Create claims expiring `ttl` after `now`.
    pub fn issued_at(subject: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = now.checked_add_signed(ttl).unwrap_or(if ttl < Duration::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });

        // `exp` is a NumericDate; keep it non-negative.
        Self {
            sub: subject.into(),
            exp: expiration.timestamp().max(0),
        }
    }

    /// Expiration as a UTC instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

/// Claim set as read back from a token, before the subject is checked.
///
/// Unknown claims are rejected at deserialisation time.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ReceivedClaims {
    pub sub: Option<String>,
    pub exp: i64,
}
