use std::sync::Arc;

use crate::account::{CredentialStore, PgUserRepository, UserRepository};
use crate::db::Database;
use crate::meals::{MealRepository, MealService, PgMealRepository};
use crate::user_auth::{TokenService, UserAuthService};

/// Gateway application state (shared across requests)
#[derive(Clone)]
pub struct AppState {
    pub users: CredentialStore,
    pub meals: MealService,
    pub auth: UserAuthService,
    /// Signing keys; read-only after startup
    pub tokens: Arc<TokenService>,
    /// PostgreSQL handle for health checks. `None` when running on in-memory repositories.
    pub db: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        meal_repo: Arc<dyn MealRepository>,
        tokens: Arc<TokenService>,
        db: Option<Arc<Database>>,
    ) -> Self {
        let users = CredentialStore::new(user_repo);
        Self {
            auth: UserAuthService::new(users.clone(), tokens.clone()),
            users,
            meals: MealService::new(meal_repo),
            tokens,
            db,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn with_database(db: Arc<Database>, tokens: Arc<TokenService>) -> Self {
        let pool = db.pool().clone();
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgMealRepository::new(pool)),
            tokens,
            Some(db),
        )
    }

    #[cfg(test)]
    pub fn in_memory(secret: &str) -> Self {
        let store = Arc::new(crate::db::mock::MemoryStore::new());
        let tokens = Arc::new(TokenService::with_default_ttl(secret).expect("test secret"));
        Self::new(store.clone(), store, tokens, None)
    }
}
