/// Account flags the authentication chain needs from a user record.
///
/// Implemented by whatever user entity the storage layer returns.
pub trait Account {
    fn is_active(&self) -> bool;

    fn is_superuser(&self) -> bool;
}

/// Access to the stored password hash of an account, for login.
pub trait StoredCredential: Account {
    /// Stringified identifier used as the token subject.
    fn subject(&self) -> String;

    /// Stored password hash (Argon2 PHC string or legacy bcrypt).
    fn password_hash(&self) -> &str;
}

/// Authenticated identity attached to one request.
///
/// The flags are read from the user record when the principal is built and
/// are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal<U> {
    user: U,
    is_active: bool,
    is_superuser: bool,
}

impl<U: Account> Principal<U> {
    /// Snapshot the account flags of `user`.
    pub fn from_user(user: U) -> Self {
        let is_active = user.is_active();
        let is_superuser = user.is_superuser();

        Self {
            user,
            is_active,
            is_superuser,
        }
    }
}

impl<U> Principal<U> {
    pub fn user(&self) -> &U {
        &self.user
    }

    pub fn into_user(self) -> U {
        self.user
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }
}
