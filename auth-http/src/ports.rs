use async_trait::async_trait;
use auth::Account;

/// Persistence lookup used to load the user behind a bearer token.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    type User: Account + Clone + Send + Sync + 'static;

    /// Retrieve the user a token subject points at.
    ///
    /// # Arguments
    /// * `subject` - The `sub` claim of a verified token
    ///
    /// # Returns
    /// The user, or `None` when no user has this identifier
    ///
    /// # Errors
    /// * Storage failure; surfaced as an internal server error
    async fn find_by_subject(&self, subject: &str) -> anyhow::Result<Option<Self::User>>;
}
