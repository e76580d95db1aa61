use std::sync::Arc;

use crate::{
    auth::password::PasswordHasher,
    db::{StoreError, UserStore},
    error::{AppError, AppResult},
    models::{AuthCredentials, NewUser, User},
};

/// Account persistence plus the sign-up and credential checks built on it.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Creates an account with a freshly salted hash.
    ///
    /// A taken username becomes `AppError::Conflict`. Every other store failure is
    /// returned as `AppError::Store` with the original error inside.
    pub async fn sign_up(&self, credentials: &AuthCredentials) -> AppResult<()> {
        let salt = self.hasher.generate_salt()?;
        let password = self.hash_password(&credentials.password, &salt)?;

        let user = NewUser {
            username: credentials.username.clone(),
            password,
            salt,
        };

        match self.store.insert(user).await {
            Ok(_) => Ok(()),
            Err(StoreError::UniqueViolation(_)) => {
                Err(AppError::Conflict("Username already exists".into()))
            }
            Err(other) => Err(AppError::Store(other)),
        }
    }

    /// Returns the username when the credentials match, `None` otherwise.
    ///
    /// An unknown username returns without hashing anything, so response time differs
    /// between unknown users and wrong passwords.
    pub async fn validate_user_password(
        &self,
        credentials: &AuthCredentials,
    ) -> AppResult<Option<String>> {
        let Some(user) = self.store.find_by_username(&credentials.username).await? else {
            return Ok(None);
        };

        if user.validate_password(&credentials.password, self.hasher.as_ref())? {
            Ok(Some(user.username))
        } else {
            Ok(None)
        }
    }

    pub fn hash_password(&self, password: &str, salt: &str) -> AppResult<String> {
        Ok(self.hasher.hash(password, salt)?)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.store.find_by_username(username).await?)
    }
}
