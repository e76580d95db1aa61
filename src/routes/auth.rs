use crate::{auth::AuthService, error::AppError, models::AuthCredentials};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: The account was created. Empty body.
/// - `409 Conflict`: The username is taken.
/// - `422 Unprocessable Entity`: Username or password fails validation.
#[post("/signup")]
pub async fn sign_up(
    auth: web::Data<AuthService>,
    credentials: web::Json<AuthCredentials>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;
    auth.sign_up(&credentials).await?;
    log::info!("Registered user \"{}\"", credentials.username);

    Ok(HttpResponse::Created().finish())
}

/// Sign in
///
/// Returns `{"accessToken": "<jwt>"}` for valid credentials, `401 Unauthorized` otherwise.
#[post("/signin")]
pub async fn sign_in(
    auth: web::Data<AuthService>,
    credentials: web::Json<AuthCredentials>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;
    let response = auth.sign_in(&credentials).await?;

    Ok(HttpResponse::Ok().json(response))
}
