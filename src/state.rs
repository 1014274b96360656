use std::sync::Arc;

use sqlx::PgPool;

use crate::accounts::UserManager;
use crate::config::Config;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub users: UserManager<PgPool>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self {
            users: UserManager::new(pool.clone()),
            pool,
            config,
        }
    }
}
