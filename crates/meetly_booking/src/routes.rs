// --- File: crates/meetly_booking/src/routes.rs ---
use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handlers::{create_booking_handler, BookingState};
use crate::workflow::BookingCreationWorkflow;

/// Creates a router containing the booking routes, relative to `/api`.
pub fn routes(workflow: Arc<BookingCreationWorkflow>) -> Router {
    let state = Arc::new(BookingState { workflow });

    Router::new()
        .route("/bookings", post(create_booking_handler))
        .with_state(state)
}
