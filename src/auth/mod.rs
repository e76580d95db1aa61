//! Accounts, password hashing and token authentication.
//!
//! `UserRepository` owns sign-up and credential checks, `AuthService` turns valid
//! credentials into tokens, and `AuthMiddleware` + `AuthenticatedUser` protect routes by
//! verifying the bearer token and resolving it through `JwtStrategy`.

pub mod extractors;
pub mod middleware;
pub mod password;
pub mod repository;
pub mod service;
pub mod strategy;
pub mod token;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{BcryptHasher, PasswordHasher};
pub use repository::UserRepository;
pub use service::{AuthService, SignInResponse};
pub use strategy::JwtStrategy;
pub use token::{JwtKeys, JwtPayload};
