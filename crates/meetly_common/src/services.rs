// --- File: crates/meetly_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The booking workflow only talks to the outside world through the traits in
//! this module: an identity provider handing out delegated OAuth tokens, a
//! calendar API, and the booking store. Implementations live in their own
//! crates (`meetly-identity`, `meetly-gcal`, `meetly-db`) and are injected as
//! `Arc<dyn Trait>`, which keeps the workflow testable with doubles.
//!
//! Failures are returned as tagged enums so callers can match on the kind of
//! failure instead of inspecting messages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Booking, NewBooking, SchedulingEvent};

/// Why an access token could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The user never linked the external calendar account.
    #[error("no linked OAuth account")]
    NoConnection,
    /// The provider holds a link but could not hand out a usable token
    /// (expired or revoked refresh token). The user has to reauthorize.
    #[error("token retrieval failed: {0}")]
    TokenRetrieval(String),
    /// Any other provider failure.
    #[error("identity provider error: {0}")]
    Other(String),
}

/// Why a calendar event could not be created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The calendar API rejected the access token (HTTP 401).
    #[error("calendar API rejected the access token")]
    Unauthorized,
    /// An authorization-related failure that is not a plain 401, for example
    /// a missing token or an insufficient-permission response.
    #[error("{0}")]
    Credential(String),
    /// Any other calendar API failure.
    #[error("calendar API error: {0}")]
    Api(String),
}

/// Failures of the booking store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Details of a calendar event to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventRequest {
    pub summary: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub attendees: Vec<String>,
    /// Request id for the conference link; the calendar allocates at most one
    /// conference per id.
    pub conference_request_id: String,
}

/// What the calendar returned for a created event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventResult {
    pub meet_link: Option<String>,
    pub remote_event_id: String,
}

/// Resolves an external identity to a delegated access token.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait AuthTokenProvider: Send + Sync {
    /// Fetches a fresh access token for the identity-provider user `external_id`.
    async fn get_token(&self, external_id: &str) -> Result<String, TokenError>;
}

/// Creates events on a remote calendar.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Creates `event` with a video-conference link, authorized by `token`.
    async fn create_event(
        &self,
        token: &str,
        event: CalendarEventRequest,
    ) -> Result<CalendarEventResult, CalendarError>;
}

/// Reads scheduling events and writes bookings.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Looks up an event joined with its owner. `Ok(None)` when it does not exist.
    async fn find_event_with_owner(
        &self,
        event_id: &str,
    ) -> Result<Option<SchedulingEvent>, StoreError>;

    /// Inserts a booking row and returns it with its generated id.
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError>;
}
