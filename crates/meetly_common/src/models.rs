// --- File: crates/meetly_common/src/models.rs ---

// Data structures shared by the store, the workflow and the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The user owning a scheduling event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EventOwner {
    /// Application user id.
    pub user_id: String,
    /// Identity-provider user id, used to fetch delegated OAuth tokens.
    pub external_id: String,
    pub email: String,
    pub name: String,
}

/// A bookable event type together with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SchedulingEvent {
    pub id: String,
    pub title: String,
    pub owner: EventOwner,
}

/// Input of a booking creation, as sent by the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "evt_intro_call"))]
    pub event_id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Ada Lovelace"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-15T10:00:00Z"))]
    pub start_time: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-15T10:30:00Z"))]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// Fields of a booking row before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub event_id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub additional_info: Option<String>,
    pub meet_link: Option<String>,
    pub google_event_id: String,
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub additional_info: Option<String>,
    pub meet_link: Option<String>,
    pub google_event_id: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Builds the persisted form of `new` with the id and creation time the store assigned.
    pub fn from_new(id: String, new: NewBooking, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            event_id: new.event_id,
            user_id: new.user_id,
            name: new.name,
            email: new.email,
            start_time: new.start_time,
            end_time: new.end_time,
            additional_info: new.additional_info,
            meet_link: new.meet_link,
            google_event_id: new.google_event_id,
            created_at,
        }
    }
}
