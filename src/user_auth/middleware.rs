//! Bearer-token gate for protected routes.
//!
//! [`require_user`] and [`require_admin`] both go through [`authenticate`];
//! on success the sanitized caller is inserted into the request extensions
//! as [`AuthenticatedUser`].

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::account::PublicUser;
use crate::error::{AppError, AppResult};
use crate::gateway::state::AppState;

/// The caller, attached by the auth layers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub PublicUser);

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Authentication("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Authentication("Invalid Authorization header".to_string()))?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::Authentication(
            "Invalid Authorization header format".to_string(),
        )),
    }
}

/// Resolve the request's bearer token to an active user.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> AppResult<PublicUser> {
    let token = bearer_token(headers).inspect_err(|e| {
        tracing::warn!(reason = %e, "auth rejected");
    })?;

    let claims = state.tokens.verify_token(token).map_err(|e| {
        tracing::warn!(reason = %e, "auth rejected: bad token");
        AppError::from(e)
    })?;
    let user_id = claims.user_id()?;

    let user = state.users.find_by_id(user_id).await?.ok_or_else(|| {
        tracing::warn!(user_id, "auth rejected: user no longer exists");
        AppError::Authentication("User not found".to_string())
    })?;

    if !user.can_login() {
        tracing::warn!(user_id, "auth rejected: account not activated");
        return Err(AppError::Authentication(
            "Account is not activated".to_string(),
        ));
    }

    Ok(user.into())
}

/// Layer for self-service routes.
pub async fn require_user(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, request.headers()).await?;
    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

/// Layer for admin routes: authenticated and `is_admin`.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, request.headers()).await?;
    if !user.is_admin {
        tracing::warn!(user_id = user.id, path = %request.uri().path(), "admin route denied");
        return Err(AppError::Authorization(
            "Admin privileges required".to_string(),
        ));
    }
    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}
