//! Account management module
//!
//! PostgreSQL-based credential store: user records, password hashing and
//! profile updates.

pub mod models;
pub mod password;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use models::{AccountFlags, NewUser, PublicUser, User, UserUpdate};
pub use repository::{PgUserRepository, UserRepository};
pub use service::{CredentialStore, ProfileUpdate};
