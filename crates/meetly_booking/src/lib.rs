// --- File: crates/meetly_booking/src/lib.rs ---
//! Booking creation for Meetly.
//!
//! [`BookingCreationWorkflow`] ties the identity provider, the calendar and the
//! booking store together; [`routes`] exposes it as `POST /bookings`.

pub mod doc;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod result;
pub mod routes;
pub mod workflow;
#[cfg(test)]
mod workflow_proptest;

pub use result::{BookingError, BookingResult, BookingStage, CreatedBooking, ErrorCode};
pub use routes::routes;
pub use workflow::BookingCreationWorkflow;
