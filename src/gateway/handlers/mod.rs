//! HTTP route handlers
//!
//! Handlers only translate between HTTP and the services. Ownership is
//! decided by which service method is called: self-service handlers pass the
//! authenticated caller's id, admin handlers call the unscoped variants.

pub mod admin;
pub mod health;
pub mod meals;
pub mod profile;

pub use health::{HealthResponse, health_check};

use crate::error::AppError;

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("route")
}
