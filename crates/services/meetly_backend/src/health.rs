// --- File: crates/services/meetly_backend/src/health.rs ---
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

/// Reports liveness and whether the database answers.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        database: state.service_factory.db().is_healthy().await,
    })
}
