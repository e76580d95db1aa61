pub mod task;
pub mod user;

pub use task::{CreateTaskDto, GetTasksFilter, NewTask, Task, TaskStatus, UpdateTaskStatusDto};
pub use user::{AuthCredentials, NewUser, User};
