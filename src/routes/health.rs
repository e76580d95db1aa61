use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// `GET /health`
///
/// Public, unauthenticated. Reports that the tasktrack process is serving
/// requests, along with its package version. PostgreSQL is not queried, so a
/// healthy answer says nothing about the pool.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}
