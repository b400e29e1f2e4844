use async_trait::async_trait;
use auth::gate;
use auth::Principal;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::ApiError;
use crate::ports::UserRepository;
use crate::state::AuthState;

/// Middleware that resolves the bearer token and stores the principal in
/// request extensions.
///
/// Performs exactly one repository lookup per request, and none when the
/// token itself is rejected.
pub async fn authenticate<R: UserRepository>(
    State(state): State<AuthState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let resolver = state.authenticator.resolver();

    let subject = {
        let token = extract_token_from_header(req.headers())?;
        resolver.subject(token)?
    };

    let user = state
        .users
        .find_by_subject(&subject)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "User lookup failed");
            ApiError::InternalServerError("User lookup failed".to_string())
        })?;

    let principal = resolver.admit(&subject, user)?;
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Middleware that lets only superusers through.
///
/// Must run after [`authenticate`] for the same user type.
pub async fn require_superuser<U>(mut req: Request, next: Next) -> Result<Response, ApiError>
where
    U: Clone + Send + Sync + 'static,
{
    let principal = req
        .extensions_mut()
        .remove::<Principal<U>>()
        .ok_or_else(ApiError::not_authenticated)?;

    let principal = gate::require_superuser(principal)?;
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Authenticated principal of the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser<U>(pub Principal<U>);

#[async_trait]
impl<S, U> FromRequestParts<S> for CurrentUser<U>
where
    S: Send + Sync,
    U: Clone + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal<U>>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(ApiError::not_authenticated)
    }
}

/// Extract the raw token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively.
pub fn extract_token_from_header(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers.get(header::AUTHORIZATION).ok_or_else(|| {
        tracing::debug!("Missing Authorization header");
        ApiError::not_authenticated()
    })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::debug!("Authorization header is not valid UTF-8");
        ApiError::not_authenticated()
    })?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => Ok(token.trim()),
        _ => {
            tracing::debug!("Authorization header does not use the Bearer scheme");
            Err(ApiError::not_authenticated())
        }
    }
}
