//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Repositories and services return `AppResult<T>`; handlers hand the error straight to
//! Actix Web, which renders it through the `ResponseError` implementation below as a JSON
//! body of the form `{"error": "<message>"}`.
//!
//! Persistence failures arrive as `StoreError` and are converted in exactly one place,
//! `From<StoreError> for AppError`. Callers that need a domain-specific mapping (a
//! duplicate username becoming `Conflict`, a failed task insert becoming
//! `InternalServerError`) match on the `StoreError` before falling back to that conversion.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::db::StoreError;

/// Result alias used by repositories, services and handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or the authenticated user no longer exists (HTTP 401).
    Unauthorized(String),
    /// Malformed request (HTTP 400).
    BadRequest(String),
    /// The task does not exist or belongs to another user (HTTP 404).
    NotFound(String),
    /// A unique resource already exists, e.g. a taken username (HTTP 409).
    Conflict(String),
    /// Unexpected server-side error (HTTP 500).
    /// The message is logged but never sent to the client.
    InternalServerError(String),
    /// A persistence failure surfaced without re-categorisation (HTTP 500).
    Store(StoreError),
    /// Input validation failed (HTTP 422).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Store(err) => write!(f, "Store Error: {}", err),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::ValidationError(msg) => msg.clone(),
            AppError::InternalServerError(msg) => {
                log::error!("Internal server error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Store(err) => {
                log::error!("Unhandled store error: {}", err);
                "Internal server error".to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Persistence failures keep their original shape, except a missing row which
/// becomes `AppError::NotFound`.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::Database(sqlx::Error::RowNotFound) => {
                AppError::NotFound("Record not found".into())
            }
            other => AppError::Store(other),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        StoreError::from(error).into()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Token decoding and signature failures are reported as `Unauthorized`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}
