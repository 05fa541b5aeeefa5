//! User authentication
//!
//! - [`token`]: HS256 session/service tokens
//! - [`service`]: signup and login
//! - [`middleware`]: `require_user` / `require_admin` route layers
//! - [`handlers`]: `/auth/*` routes

pub mod handlers;
pub mod middleware;
pub mod service;
pub mod token;

pub use middleware::{AuthenticatedUser, require_admin, require_user};
pub use service::{AuthResponse, LoginRequest, SignupRequest, UserAuthService};
pub use token::{Claims, TokenError, TokenService};
