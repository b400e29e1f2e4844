use crate::errors::AuthFailure;
use crate::jwt::TokenCodec;
use crate::principal::Account;
use crate::principal::Principal;

/// User lookup capability borrowed by the resolver.
///
/// Typically backed by the request's database session.
pub trait UserLookup {
    type User: Account;

    /// Load the user a token subject points at.
    ///
    /// # Arguments
    /// * `subject` - The `sub` claim of a verified token
    ///
    /// # Returns
    /// The user, or `None` when no user has this identifier
    fn find_by_subject(&self, subject: &str) -> Option<Self::User>;
}

/// Turns a raw bearer token into an authenticated principal.
///
/// Verification failures and unknown subjects both come out as
/// `InvalidCredentials`; the precise reason is only logged. An existing but
/// disabled account is reported as `InactiveUser`.
#[derive(Clone)]
pub struct Resolver {
    codec: TokenCodec,
}

impl Resolver {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Resolve a bearer token with exactly one user lookup.
    ///
    /// # Arguments
    /// * `token` - Raw token taken from the `Authorization` header
    /// * `lookup` - Storage capability used to load the token's subject
    ///
    /// # Returns
    /// Principal for an existing, active user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Token rejected, or no user for its subject
    /// * `InactiveUser` - User exists but is disabled
    pub fn resolve<L: UserLookup>(
        &self,
        token: &str,
        lookup: &L,
    ) -> Result<Principal<L::User>, AuthFailure> {
        let subject = self.subject(token)?;
        let user = lookup.find_by_subject(&subject);
        self.admit(&subject, user)
    }

    /// Verify a token and return its subject.
    ///
    /// First half of [`Resolver::resolve`], for callers whose user lookup is
    /// asynchronous.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Token rejected for any reason
    pub fn subject(&self, token: &str) -> Result<String, AuthFailure> {
        self.codec
            .verify(token)
            .map(|claims| claims.sub)
            .map_err(|e| {
                tracing::warn!(reason = %e, "Bearer token rejected");
                AuthFailure::InvalidCredentials
            })
    }

    /// Turn the result of the subject lookup into a principal.
    ///
    /// Second half of [`Resolver::resolve`].
    ///
    /// # Errors
    /// * `InvalidCredentials` - `user` is `None`
    /// * `InactiveUser` - User exists but is disabled
    pub fn admit<U: Account>(
        &self,
        subject: &str,
        user: Option<U>,
    ) -> Result<Principal<U>, AuthFailure> {
        let user = user.ok_or_else(|| {
            tracing::warn!(subject = %subject, "Token subject has no matching user");
            AuthFailure::InvalidCredentials
        })?;

        let principal = Principal::from_user(user);
        if !principal.is_active() {
            tracing::info!(subject = %subject, "Inactive user rejected");
            return Err(AuthFailure::InactiveUser);
        }

        Ok(principal)
    }
}
