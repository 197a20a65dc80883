// --- File: crates/meetly_booking/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::result::{BookingResult, ErrorCode};
use meetly_common::models::{Booking, BookingRequest};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::create_booking_handler),
    components(schemas(BookingRequest, BookingResult, Booking, ErrorCode)),
    tags((name = "Bookings", description = "Booking creation with Google Meet links"))
)]
pub struct BookingApiDoc;
