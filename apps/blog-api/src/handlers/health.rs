//! Liveness and health endpoints.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /`.
pub const LIVENESS_MESSAGE: &str = "Blog app is running";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub store: &'static str,
}

/// GET /
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_MESSAGE)
}

/// Health check endpoint - returns server status and store reachability.
///
/// GET /health. An unreachable store answers 503 with `status: "degraded"`.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store_up = match state.blogs.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Store ping failed");
            false
        }
    };

    let response = HealthResponse {
        status: if store_up { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        store: if store_up { "up" } else { "down" },
    };

    if store_up {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
