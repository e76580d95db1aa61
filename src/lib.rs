#![doc = "The `tasktrack` library crate."]
#![doc = ""]
#![doc = "Accounts with salted password hashing, JWT authentication and per-user task"]
#![doc = "tracking. The binary (`main.rs`) wires the PostgreSQL stores, services and routes"]
#![doc = "defined here into an Actix Web server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod tasks;

pub use crate::error::{AppError, AppResult};
