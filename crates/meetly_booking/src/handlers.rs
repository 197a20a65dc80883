// --- File: crates/meetly_booking/src/handlers.rs ---
use axum::{extract::State, http::StatusCode, response::Json};
use meetly_common::models::BookingRequest;
use meetly_common::HttpStatusCode;
use std::sync::Arc;
use tracing::info;

use crate::result::BookingResult;
use crate::workflow::BookingCreationWorkflow;

/// Shared state of the booking routes.
#[derive(Clone)]
pub struct BookingState {
    pub workflow: Arc<BookingCreationWorkflow>,
}

/// Handler to create a booking with a Google Meet link.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bookings", // Path relative to /api
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResult),
        (status = 401, description = "Google account has to be linked again", body = BookingResult),
        (status = 404, description = "Event not found", body = BookingResult),
        (status = 412, description = "Owner has no Google account linked", body = BookingResult),
        (status = 500, description = "Booking failed", body = BookingResult),
        (status = 502, description = "Identity provider failure", body = BookingResult)
    ),
    tag = "Bookings"
))]
pub async fn create_booking_handler(
    State(state): State<Arc<BookingState>>,
    Json(request): Json<BookingRequest>,
) -> (StatusCode, Json<BookingResult>) {
    info!("Booking request received for event {}", request.event_id);

    match state.workflow.try_create_booking(request).await {
        Ok(created) => (StatusCode::CREATED, Json(created.into())),
        Err(err) => {
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(err.into()))
        }
    }
}
