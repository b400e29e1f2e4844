use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Account;
use auth::Authenticator;
use auth::SecurityConfig;
use auth_http::authenticate;
use auth_http::errors::ApiResponseBody;
use auth_http::require_superuser;
use auth_http::AuthState;
use auth_http::CurrentUser;
use auth_http::UserRepository;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use uuid::Uuid;

pub const SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl TestUser {
    pub fn new(email: &str, is_active: bool, is_superuser: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            is_active,
            is_superuser,
        }
    }
}

impl Account for TestUser {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn is_superuser(&self) -> bool {
        self.is_superuser
    }
}

/// In-memory user table counting lookups.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: HashMap<String, TestUser>,
    lookups: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn with_users(users: impl IntoIterator<Item = TestUser>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    type User = TestUser;

    async fn find_by_subject(&self, subject: &str) -> anyhow::Result<Option<TestUser>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.get(subject).cloned())
    }
}

/// Repository whose storage is always down.
pub struct UnavailableUserRepository;

#[async_trait]
impl UserRepository for UnavailableUserRepository {
    type User = TestUser;

    async fn find_by_subject(&self, _subject: &str) -> anyhow::Result<Option<TestUser>> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub is_superuser: bool,
}

async fn read_user_me(
    CurrentUser(principal): CurrentUser<TestUser>,
) -> Json<ApiResponseBody<UserData>> {
    let user = principal.user();
    Json(ApiResponseBody::new(
        StatusCode::OK,
        UserData {
            id: user.id.clone(),
            email: user.email.clone(),
            is_superuser: principal.is_superuser(),
        },
    ))
}

async fn read_users(CurrentUser(principal): CurrentUser<TestUser>) -> Json<ApiResponseBody<String>> {
    Json(ApiResponseBody::new(
        StatusCode::OK,
        format!("listed by {}", principal.user().email),
    ))
}

/// Test application that spawns a real server
pub struct TestApp<R> {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<R>,
}

impl<R: UserRepository<User = TestUser>> TestApp<R> {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn(users: R) -> Self {
        init_tracing();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let config = SecurityConfig::new(SECRET).with_access_token_expire_minutes(30);
        let authenticator = Arc::new(Authenticator::new(&config));
        let users = Arc::new(users);
        let state = AuthState::new(Arc::clone(&authenticator), Arc::clone(&users));

        let superuser_routes = Router::new()
            .route("/api/v1/users", get(read_users))
            .route_layer(middleware::from_fn(require_superuser::<TestUser>));

        let application = Router::new()
            .route("/api/v1/users/me", get(read_user_me))
            .merge(superuser_routes)
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                authenticate::<R>,
            ))
            .with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server failed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            users,
        }
    }

    pub fn token_for(&self, user: &TestUser) -> String {
        self.authenticator
            .issue_access_token(&user.id)
            .expect("Failed to issue token")
            .access_token
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.api_client.get(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
