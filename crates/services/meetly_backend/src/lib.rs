// --- File: crates/services/meetly_backend/src/lib.rs ---
//! Meetly backend service.
//!
//! Wires the configured collaborators into the booking workflow and exposes
//! the HTTP API under `/api`.

pub mod app_state;
pub mod health;
pub mod service_factory;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use app_state::AppState;

/// Builds the `/api` router for `state`.
pub fn api_router(state: Arc<AppState>) -> Router {
    let booking_router = meetly_booking::routes(state.service_factory.workflow());

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Meetly API!" }))
        .route("/health", get(health::health_handler))
        .with_state(state)
        .merge(booking_router);

    Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}
