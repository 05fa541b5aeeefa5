//! Application error types.
//!
//! Every layer (repositories, services, handlers, middleware) returns
//! [`AppError`]. [`ErrorKind::http_status`] is the one place where an error
//! becomes an HTTP status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::user_auth::token::TokenError;

/// Error categories exposed to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorKind {
    /// 1001: Bad or missing input
    Validation = 1001,
    /// 2001: Missing, invalid or expired credentials
    Authentication = 2001,
    /// 2003: Authenticated but not allowed
    Authorization = 2003,
    /// 4004: Resource absent or not owned by the caller
    NotFound = 4004,
    /// 4009: Username already taken
    DuplicateUsername = 4009,
    /// 5000: Unexpected persistence or server failure
    Internal = 5000,
}

impl ErrorKind {
    /// Get error code as i32.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Get error name string.
    pub fn name(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Authentication => "AUTHENTICATION_ERROR",
            Self::Authorization => "AUTHORIZATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code.
    pub fn http_status(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Authentication => StatusCode::UNAUTHORIZED,
            Self::Authorization => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::DuplicateUsername => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Authorization(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateUsername(_) => ErrorKind::DuplicateUsername,
            Self::Store(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to send to the client. Server-side failures are
    /// reduced to a generic text.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::Authentication("Token has expired".to_string()),
            TokenError::InvalidSignature => {
                Self::Authentication("Invalid or malformed token".to_string())
            }
            TokenError::EmptySecret | TokenError::Encoding(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let detail = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{}: {}", field, detail)
            })
            .collect();
        fields.sort();
        Self::Validation(fields.join("; "))
    }
}

/// JSON response body for errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        if kind == ErrorKind::Internal {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            code: kind.code(),
            error: kind.name(),
            message: self.public_message(),
        };
        (kind.http_status(), Json(body)).into_response()
    }
}
