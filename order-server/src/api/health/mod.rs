//! Health routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /health | GET | liveness probe |
//! | /api/ping | GET | connectivity check, echoes `PING_MESSAGE` |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/ping", get(ping))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    uptime_seconds: u64,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_secs(),
    })
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    message: String,
}

async fn ping(State(state): State<ServerState>) -> Json<PingResponse> {
    Json(PingResponse {
        message: state.config.ping_message.clone(),
    })
}
