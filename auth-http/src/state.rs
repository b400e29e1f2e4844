use std::sync::Arc;

use auth::Authenticator;

/// State shared by the authentication middleware.
pub struct AuthState<R> {
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<R>,
}

impl<R> AuthState<R> {
    pub fn new(authenticator: Arc<Authenticator>, users: Arc<R>) -> Self {
        Self {
            authenticator,
            users,
        }
    }
}

impl<R> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            authenticator: Arc::clone(&self.authenticator),
            users: Arc::clone(&self.users),
        }
    }
}
