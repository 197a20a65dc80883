// --- File: crates/meetly_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Data structures and models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{config_error, external_service_error, Context, HttpStatusCode, MeetlyError};

// Re-export HTTP utilities for easier access
pub use http::client::default_client;

pub use logging::{init, init_with_level, log_result};

pub use models::{Booking, BookingRequest, EventOwner, NewBooking, SchedulingEvent};
pub use services::{
    AuthTokenProvider, BookingStore, CalendarError, CalendarEventRequest, CalendarEventResult,
    CalendarService, StoreError, TokenError,
};

#[cfg(any(test, feature = "mock"))]
pub use services::{MockAuthTokenProvider, MockBookingStore, MockCalendarService};
