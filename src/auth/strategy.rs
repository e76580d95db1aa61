use crate::{
    auth::{repository::UserRepository, token::JwtPayload},
    error::{AppError, AppResult},
    models::User,
};

/// Resolves a verified token payload to the account it names.
///
/// Signature and expiry have already been checked by the time `validate` runs; this only
/// confirms the user still exists.
#[derive(Clone)]
pub struct JwtStrategy {
    users: UserRepository,
}

impl JwtStrategy {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn validate(&self, payload: &JwtPayload) -> AppResult<User> {
        self.users
            .find_by_username(&payload.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))
    }
}
