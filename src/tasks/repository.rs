use std::sync::Arc;

use crate::{
    db::TaskStore,
    error::{AppError, AppResult},
    models::{CreateTaskDto, GetTasksFilter, NewTask, Task, TaskStatus, User},
};

/// Owner-scoped task persistence.
#[derive(Clone)]
pub struct TaskRepository {
    store: Arc<dyn TaskStore>,
}

impl TaskRepository {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Persists a new `OPEN` task owned by `user`.
    ///
    /// Any store failure is logged with the username and input, then reported as
    /// `AppError::InternalServerError`.
    pub async fn create_task(&self, dto: &CreateTaskDto, user: &User) -> AppResult<Task> {
        let task = NewTask {
            title: dto.title.clone(),
            description: dto.description.clone(),
            status: TaskStatus::Open,
            user_id: user.id,
        };

        self.store.insert(task).await.map_err(|e| {
            log::error!(
                "Failed to create a task for user \"{}\", Data: {}: {}",
                user.username,
                serde_json::to_string(dto).unwrap_or_default(),
                e
            );
            AppError::InternalServerError("Failed to create task".into())
        })
    }

    /// Lists `user`'s tasks matching `filter`.
    pub async fn get_tasks(&self, filter: &GetTasksFilter, user: &User) -> AppResult<Vec<Task>> {
        self.store.find_many(filter, user.id).await.map_err(|e| {
            log::error!(
                "Failed to get tasks for user \"{}\", Filters: {}: {}",
                user.username,
                serde_json::to_string(filter).unwrap_or_default(),
                e
            );
            AppError::InternalServerError("Failed to get tasks".into())
        })
    }

    pub async fn find_one(&self, id: i32, user_id: i32) -> AppResult<Option<Task>> {
        Ok(self.store.find_one(id, user_id).await?)
    }

    /// Returns the number of rows removed; zero when the task is missing or not owned.
    pub async fn delete(&self, id: i32, user_id: i32) -> AppResult<u64> {
        Ok(self.store.delete(id, user_id).await?)
    }

    pub async fn save(&self, task: &Task) -> AppResult<Task> {
        Ok(self.store.save(task).await?)
    }
}
