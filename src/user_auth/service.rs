use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use super::token::TokenService;
use crate::account::{CredentialStore, PublicUser, User};
use crate::error::AppResult;

/// User Registration Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 8, max = 128, message = "must be 8 to 128 characters"))]
    #[schema(example = "pw123456")]
    pub password: String,
}

/// User Login Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "pw123456")]
    pub password: String,
}

/// Auth Response (JWT)
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub token: String,
}

/// Signup and login: credential checks plus session token issuance.
#[derive(Clone)]
pub struct UserAuthService {
    users: CredentialStore,
    tokens: Arc<TokenService>,
}

impl UserAuthService {
    pub fn new(users: CredentialStore, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Register a new user and log them in.
    pub async fn signup(&self, req: SignupRequest) -> AppResult<AuthResponse> {
        let user = self.users.create_user(&req.username, &req.password).await?;
        self.session_for(user)
    }

    pub async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        let user = self.users.authenticate(&req.username, &req.password).await?;
        tracing::info!(user_id = user.id, "user logged in");
        self.session_for(user)
    }

    fn session_for(&self, user: User) -> AppResult<AuthResponse> {
        let token = self.tokens.issue_session_token(user.id)?;
        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }
}
