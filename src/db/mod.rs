//! Persistence adapters.
//!
//! `UserStore` and `TaskStore` are the only surfaces the repositories talk to. The
//! `Pg*` implementations run plain runtime-checked `sqlx` queries against PostgreSQL;
//! tests substitute mocks or in-memory stores.

pub mod tasks;
pub mod users;

use sqlx::postgres::{PgPool, PgPoolOptions};

pub use tasks::{PgTaskStore, TaskStore};
pub use users::{PgUserStore, UserStore};

/// Errors raised by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write. Carries the constraint name when known.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    /// Any other database failure, unchanged.
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &error {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or(db_err.message());
                return StoreError::UniqueViolation(constraint.to_string());
            }
        }
        StoreError::Database(error)
    }
}

/// Opens the connection pool and applies pending migrations from `./migrations`.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    log::info!("Running database migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

    Ok(pool)
}
