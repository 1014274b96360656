use async_trait::async_trait;
use sqlx::PgPool;

use crate::accounts::AccountError;
use crate::db;
use crate::models::{NewUser, User};

/// Persistence for newly created accounts. Implementations must reject a
/// second account with the same email with [`AccountError::DuplicateEmail`]
/// and must persist nothing when they return an error.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, AccountError>;
}

#[async_trait]
impl UserStore for PgPool {
    async fn insert(&self, user: NewUser) -> Result<User, AccountError> {
        // Unique violations on users.email become DuplicateEmail.
        Ok(db::users::create(self, &user).await?)
    }
}
