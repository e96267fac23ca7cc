//! Service-level handlers: welcome and health check.

use crate::models::{DatabaseStatus, HealthResponse, MessageResponse};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;

/// Welcome message.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = MessageResponse)
    ),
    tag = "Root"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello World"))
}

/// Health check endpoint.
///
/// Reports pool statistics without opening a pool that does not exist yet.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.pools.peek().await {
        Some(pool) => DatabaseStatus {
            initialized: !pool.is_closed(),
            size: pool.size(),
            idle: pool.idle(),
            leased: pool.leased(),
            max_connections: pool.max_connections(),
        },
        None => DatabaseStatus {
            max_connections: state.pools.settings().max_connections,
            ..DatabaseStatus::default()
        },
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}
