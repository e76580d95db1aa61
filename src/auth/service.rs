use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    auth::{repository::UserRepository, token::JwtKeys},
    error::{AppError, AppResult},
    models::AuthCredentials,
};

/// Response body of a successful sign-in.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub access_token: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    keys: Arc<JwtKeys>,
}

impl AuthService {
    pub fn new(users: UserRepository, keys: Arc<JwtKeys>) -> Self {
        Self { users, keys }
    }

    pub async fn sign_up(&self, credentials: &AuthCredentials) -> AppResult<()> {
        self.users.sign_up(credentials).await
    }

    /// Exchanges valid credentials for an access token.
    pub async fn sign_in(&self, credentials: &AuthCredentials) -> AppResult<SignInResponse> {
        let username = self
            .users
            .validate_user_password(credentials)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

        let access_token = self.keys.sign(&username)?;
        log::debug!("Generated JWT token for user \"{}\"", username);

        Ok(SignInResponse { access_token })
    }
}
