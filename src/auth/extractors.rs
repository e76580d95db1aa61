use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::{
    auth::{strategy::JwtStrategy, token::JwtPayload},
    error::AppError,
    models::User,
};

/// The account behind the request's bearer token.
///
/// Reads the `JwtPayload` that `AuthMiddleware` stored in request extensions and resolves
/// it through `JwtStrategy::validate`, so a token for a deleted account is rejected with
/// 401 even though its signature is valid.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let payload = req.extensions().get::<JwtPayload>().cloned();
        let strategy = req.app_data::<web::Data<JwtStrategy>>().cloned();

        Box::pin(async move {
            let payload = payload.ok_or_else(|| {
                AppError::Unauthorized(
                    "Token payload not found in request. Ensure AuthMiddleware is active.".into(),
                )
            })?;
            let strategy = strategy.ok_or_else(|| {
                AppError::InternalServerError("JwtStrategy is not configured".into())
            })?;

            let user = strategy.validate(&payload).await?;
            Ok(AuthenticatedUser(user))
        })
    }
}
