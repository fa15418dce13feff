use chrono::Duration;
use std::sync::{Arc, OnceLock};

use crate::auth::TokenService;
use crate::config::Config;
use crate::store::{MemoryStore, TaskStore, UserStore};

/// Dependencies shared by every handler, handed to actix as `web::Data<AppState>`.
///
/// Everything here is read-only after startup. The stores do their own locking
/// or connection checkout.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub tokens: Arc<TokenService>,
    pub bcrypt_cost: u32,
    /// Hash checked when a login names an unknown user, built on first use at
    /// `bcrypt_cost` so that path costs as much as a wrong password.
    pub(crate) unknown_user_hash: Arc<OnceLock<String>>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
        tokens: TokenService,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            tasks,
            tokens: Arc::new(tokens),
            bcrypt_cost,
            unknown_user_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Builds state over a single store backing both users and tasks.
    pub fn with_store<S>(store: Arc<S>, config: &Config) -> Self
    where
        S: UserStore + TaskStore + 'static,
    {
        let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl);
        Self::new(store.clone(), store, tokens, config.bcrypt_cost)
    }

    /// State over a fresh in-memory store. Used by tests and database-less runs.
    pub fn in_memory(secret: &str, bcrypt_cost: u32) -> Self {
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenService::new(secret.as_bytes(), Duration::hours(24));
        Self::new(store.clone(), store, tokens, bcrypt_cost)
    }
}
