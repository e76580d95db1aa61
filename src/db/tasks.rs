use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::StoreError;
use crate::models::{GetTasksFilter, NewTask, Task};

const TASK_COLUMNS: &str = "id, title, description, status, user_id";

/// Persistence surface for tasks. Every lookup, delete and update is scoped by owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError>;

    async fn find_one(&self, id: i32, user_id: i32) -> Result<Option<Task>, StoreError>;

    async fn find_many(
        &self,
        filter: &GetTasksFilter,
        user_id: i32,
    ) -> Result<Vec<Task>, StoreError>;

    /// Returns the number of rows removed.
    async fn delete(&self, id: i32, user_id: i32) -> Result<u64, StoreError>;

    /// Writes the mutable fields of an existing task back.
    async fn save(&self, task: &Task) -> Result<Task, StoreError>;
}

/// Builds the owner-scoped listing query.
///
/// The search clause is parenthesised; without that the `OR` would escape the
/// `user_id` constraint and expose other users' tasks.
pub fn tasks_query(filter: &GetTasksFilter, user_id: i32) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = "));
    query.push_bind(user_id);

    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        query
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    query.push(" ORDER BY id");
    query
}

#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        let row = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, status, user_id) VALUES ($1, $2, $3, $4)
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(task.title)
        .bind(task.description)
        .bind(task.status)
        .bind(task.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_one(&self, id: i32, user_id: i32) -> Result<Option<Task>, StoreError> {
        let row = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_many(
        &self,
        filter: &GetTasksFilter,
        user_id: i32,
    ) -> Result<Vec<Task>, StoreError> {
        let mut query = tasks_query(filter, user_id);
        let rows = query.build_query_as::<Task>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn delete(&self, id: i32, user_id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn save(&self, task: &Task) -> Result<Task, StoreError> {
        let row = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET title = $1, description = $2, status = $3
             WHERE id = $4 AND user_id = $5
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.id)
        .bind(task.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
