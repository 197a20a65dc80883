// --- File: crates/meetly_booking/src/result.rs ---
//! Outcome types of the booking workflow.
//!
//! [`BookingError`] is the typed failure returned by
//! [`crate::BookingCreationWorkflow::try_create_booking`]. [`BookingResult`] is
//! the flat value handed to callers that only want `success`, a message and,
//! for authorization failures, a machine-readable code plus a hint whether the
//! calendar account has to be linked again.

use meetly_common::models::Booking;
use meetly_common::services::{CalendarError, StoreError, TokenError};
use meetly_common::HttpStatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Step of the booking workflow. Attached to log lines and to unclassified errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStage {
    ResolvingEvent,
    ResolvingToken,
    CreatingCalendarEvent,
    Persisting,
    Done,
}

impl fmt::Display for BookingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStage::ResolvingEvent => "resolving_event",
            BookingStage::ResolvingToken => "resolving_token",
            BookingStage::CreatingCalendarEvent => "creating_calendar_event",
            BookingStage::Persisting => "persisting",
            BookingStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Machine-readable failure codes for calendar authorization problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoGoogleConnection,
    GoogleAuthRequired,
    GoogleAuthError,
    GoogleTokenExpired,
}

/// Why a booking could not be created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Event not found")]
    EventNotFound,

    /// The event owner never linked a Google account.
    #[error("Google Calendar is not connected. Please connect your Google account.")]
    NoGoogleConnection,

    /// The identity provider holds a link but its refresh token is no longer usable.
    #[error("Google Calendar authorization expired. Please reconnect your Google account.")]
    GoogleAuthRequired(String),

    #[error("Failed to get Google Calendar access")]
    GoogleAuthError(String),

    /// The calendar API rejected a freshly issued token.
    #[error("Google Calendar access expired")]
    GoogleTokenExpired,

    /// Authorization-kind failure while creating the calendar event.
    #[error("Failed to create calendar event: {0}")]
    CalendarCredential(String),

    #[error("Failed to create booking")]
    Unexpected { stage: BookingStage, message: String },
}

impl BookingError {
    pub fn unexpected(stage: BookingStage, message: impl Into<String>) -> Self {
        BookingError::Unexpected {
            stage,
            message: message.into(),
        }
    }

    pub(crate) fn from_store(stage: BookingStage, err: StoreError) -> Self {
        BookingError::unexpected(stage, err.to_string())
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            BookingError::NoGoogleConnection => Some(ErrorCode::NoGoogleConnection),
            BookingError::GoogleAuthRequired(_) => Some(ErrorCode::GoogleAuthRequired),
            BookingError::GoogleAuthError(_) => Some(ErrorCode::GoogleAuthError),
            BookingError::GoogleTokenExpired => Some(ErrorCode::GoogleTokenExpired),
            BookingError::EventNotFound
            | BookingError::CalendarCredential(_)
            | BookingError::Unexpected { .. } => None,
        }
    }

    /// Whether the owner has to link the calendar account again.
    /// `None` for failures that say nothing about the account.
    pub fn requires_reauth(&self) -> Option<bool> {
        match self {
            BookingError::NoGoogleConnection | BookingError::GoogleAuthError(_) => Some(false),
            BookingError::GoogleAuthRequired(_)
            | BookingError::GoogleTokenExpired
            | BookingError::CalendarCredential(_) => Some(true),
            BookingError::EventNotFound | BookingError::Unexpected { .. } => None,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            BookingError::Unexpected { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Stage the workflow was in when this error was raised.
    pub fn stage(&self) -> BookingStage {
        match self {
            BookingError::EventNotFound => BookingStage::ResolvingEvent,
            BookingError::NoGoogleConnection
            | BookingError::GoogleAuthRequired(_)
            | BookingError::GoogleAuthError(_) => BookingStage::ResolvingToken,
            BookingError::GoogleTokenExpired | BookingError::CalendarCredential(_) => {
                BookingStage::CreatingCalendarEvent
            }
            BookingError::Unexpected { stage, .. } => *stage,
        }
    }

    pub fn is_unexpected(&self) -> bool {
        matches!(self, BookingError::Unexpected { .. })
    }
}

impl From<TokenError> for BookingError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::NoConnection => BookingError::NoGoogleConnection,
            TokenError::TokenRetrieval(msg) => BookingError::GoogleAuthRequired(msg),
            TokenError::Other(msg) => BookingError::GoogleAuthError(msg),
        }
    }
}

impl From<CalendarError> for BookingError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::Unauthorized => BookingError::GoogleTokenExpired,
            CalendarError::Credential(msg) => BookingError::CalendarCredential(msg),
            other => {
                BookingError::unexpected(BookingStage::CreatingCalendarEvent, other.to_string())
            }
        }
    }
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::EventNotFound => 404,
            BookingError::NoGoogleConnection => 412,
            BookingError::GoogleAuthRequired(_)
            | BookingError::GoogleTokenExpired
            | BookingError::CalendarCredential(_) => 401,
            BookingError::GoogleAuthError(_) => 502,
            BookingError::Unexpected { .. } => 500,
        }
    }
}

/// A booking together with the conference link of its calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBooking {
    pub booking: Booking,
    pub meet_link: Option<String>,
}

/// Flat result of a booking attempt, serialized camelCase with absent fields omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_reauth: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_link: Option<String>,
}

impl From<CreatedBooking> for BookingResult {
    fn from(created: CreatedBooking) -> Self {
        BookingResult {
            success: true,
            error: None,
            code: None,
            requires_reauth: None,
            details: None,
            booking: Some(created.booking),
            meet_link: created.meet_link,
        }
    }
}

impl From<BookingError> for BookingResult {
    fn from(err: BookingError) -> Self {
        BookingResult {
            success: false,
            error: Some(err.to_string()),
            code: err.code(),
            requires_reauth: err.requires_reauth(),
            details: err.details().map(str::to_string),
            booking: None,
            meet_link: None,
        }
    }
}

impl From<Result<CreatedBooking, BookingError>> for BookingResult {
    fn from(result: Result<CreatedBooking, BookingError>) -> Self {
        match result {
            Ok(created) => created.into(),
            Err(err) => err.into(),
        }
    }
}
