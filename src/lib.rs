//! Calorie Tracker - REST backend for meal logging
//!
//! # Modules
//!
//! - [`account`] - Credential store: user records and password hashing
//! - [`meals`] - Owner-scoped meal repository and daily consumption
//! - [`user_auth`] - Bearer tokens, signup/login and the auth layers
//! - [`gateway`] - HTTP router, handlers and OpenAPI document
//! - [`db`] - PostgreSQL pool and migrations
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - `AppError` and the error-to-status mapping

pub mod account;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod meals;
pub mod user_auth;

// Convenient re-exports at crate root
pub use error::{AppError, AppResult, ErrorKind};
pub use user_auth::token::{Claims, TokenError, TokenService};
