pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Mounts the auth and task routes.
///
/// Expects `web::Data` for `AuthService`, `TasksService`, `JwtStrategy` and `JwtKeys`
/// in app data. Everything under `/tasks` requires a bearer token.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::sign_up)
            .service(auth::sign_in),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task_status)
            .service(tasks::delete_task),
    );
}
