use crate::{
    error::{AppError, AppResult},
    models::{CreateTaskDto, GetTasksFilter, Task, TaskStatus, User},
    tasks::repository::TaskRepository,
};

/// Task operations available to an authenticated user. Every call is scoped to `user`.
#[derive(Clone)]
pub struct TasksService {
    tasks: TaskRepository,
}

impl TasksService {
    pub fn new(tasks: TaskRepository) -> Self {
        Self { tasks }
    }

    pub async fn get_tasks(&self, filter: &GetTasksFilter, user: &User) -> AppResult<Vec<Task>> {
        self.tasks.get_tasks(filter, user).await
    }

    pub async fn get_task_by_id(&self, id: i32, user: &User) -> AppResult<Task> {
        self.tasks
            .find_one(id, user.id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create_task(&self, dto: &CreateTaskDto, user: &User) -> AppResult<Task> {
        self.tasks.create_task(dto, user).await
    }

    pub async fn delete_task(&self, id: i32, user: &User) -> AppResult<()> {
        if self.tasks.delete(id, user.id).await? == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Sets any status on an owned task; there is no restriction on transitions.
    pub async fn update_task_status(
        &self,
        id: i32,
        status: TaskStatus,
        user: &User,
    ) -> AppResult<Task> {
        let mut task = self.get_task_by_id(id, user).await?;
        task.status = status;
        self.tasks.save(&task).await
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Task with ID \"{}\" not found", id))
}
