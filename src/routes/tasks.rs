use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTaskDto, GetTasksFilter, UpdateTaskStatusDto},
    tasks::TasksService,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// ## Query Parameters:
/// - `status` (optional): `OPEN`, `IN_PROGRESS` or `DONE`.
/// - `search` (optional): Substring looked for in titles and descriptions.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `400 Bad Request`: Unknown status.
/// - `401 Unauthorized`: Missing or invalid token.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TasksService>,
    filter: web::Query<GetTasksFilter>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    filter.validate()?;
    log::info!(
        "User \"{}\" retrieving all tasks. Filters: {}",
        user.username,
        serde_json::to_string(&*filter).unwrap_or_default()
    );

    let result = tasks.get_tasks(&filter, &user).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Retrieves one task owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: The `Task`.
/// - `404 Not Found`: The task does not exist or belongs to someone else.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TasksService>,
    task_id: web::Path<i32>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.get_task_by_id(task_id.into_inner(), &user).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Creates a task for the authenticated user. New tasks start `OPEN`.
///
/// ## Responses:
/// - `201 Created`: The new `Task`.
/// - `422 Unprocessable Entity`: Empty title or description.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TasksService>,
    dto: web::Json<CreateTaskDto>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    log::info!(
        "User \"{}\" creating a new task. Data: {}",
        user.username,
        serde_json::to_string(&*dto).unwrap_or_default()
    );

    let task = tasks.create_task(&dto, &user).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Deletes a task owned by the authenticated user.
///
/// ## Responses:
/// - `204 No Content`: Deleted.
/// - `404 Not Found`: The task does not exist or belongs to someone else.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TasksService>,
    task_id: web::Path<i32>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    tasks.delete_task(task_id.into_inner(), &user).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Changes the status of a task owned by the authenticated user.
///
/// ## Request Body:
/// `{"status": "OPEN" | "IN_PROGRESS" | "DONE"}`
///
/// ## Responses:
/// - `200 OK`: The updated `Task`.
/// - `400 Bad Request`: Unknown status.
/// - `404 Not Found`: The task does not exist or belongs to someone else.
#[patch("/{id}/status")]
pub async fn update_task_status(
    tasks: web::Data<TasksService>,
    task_id: web::Path<i32>,
    body: web::Json<UpdateTaskStatusDto>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .update_task_status(task_id.into_inner(), body.status, &user)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}
