use async_trait::async_trait;
use sqlx::PgPool;

use super::StoreError;
use crate::models::{NewUser, User};

/// Persistence surface for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. Fails with `StoreError::UniqueViolation` on a taken username.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Finds a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, salt) VALUES ($1, $2, $3)
             RETURNING id, username, password, salt",
        )
        .bind(user.username)
        .bind(user.password)
        .bind(user.salt)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, username, password, salt FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
