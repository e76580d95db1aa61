use crate::{config::Config, error::AppError};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JwtPayload {
    /// Username the token was issued to.
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Signing and verification keys derived from the configured secret.
///
/// Built once at startup and shared through app data; nothing reads the secret from the
/// environment after that.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in_secs: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, expires_in_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expires_in_secs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expires_in_secs)
    }

    /// Issues an HS256 token for `username`, valid for the configured lifetime.
    pub fn sign(&self, username: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp();
        let payload = JwtPayload {
            username: username.to_string(),
            iat: now,
            exp: now + self.expires_in_secs,
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature and expiry and returns the decoded payload.
    ///
    /// Returns `AppError::Unauthorized` if the token is malformed, its signature is invalid,
    /// or it has expired.
    pub fn verify(&self, token: &str) -> Result<JwtPayload, AppError> {
        let data = decode::<JwtPayload>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }
}
