// --- File: crates/meetly_booking/src/workflow.rs ---
//! The booking creation workflow.
//!
//! A booking goes through four steps, each short-circuiting on failure:
//! resolve the scheduling event and its owner, fetch a delegated Google token
//! for the owner, create the calendar event with a Meet link, and persist the
//! booking row. A calendar event that was created is never rolled back when
//! the final insert fails.

use chrono::{DateTime, Utc};
use meetly_common::models::{BookingRequest, NewBooking, SchedulingEvent};
use meetly_common::services::{
    AuthTokenProvider, BookingStore, CalendarEventRequest, CalendarService,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::result::{BookingError, BookingResult, BookingStage, CreatedBooking};

/// Creates bookings backed by a Google Calendar event.
///
/// Holds no mutable state; share it behind an `Arc` across requests.
#[derive(Clone)]
pub struct BookingCreationWorkflow {
    store: Arc<dyn BookingStore>,
    tokens: Arc<dyn AuthTokenProvider>,
    calendar: Arc<dyn CalendarService>,
}

impl BookingCreationWorkflow {
    pub fn new(
        store: Arc<dyn BookingStore>,
        tokens: Arc<dyn AuthTokenProvider>,
        calendar: Arc<dyn CalendarService>,
    ) -> Self {
        Self {
            store,
            tokens,
            calendar,
        }
    }

    /// Runs the workflow and folds every outcome into a [`BookingResult`].
    pub async fn create_booking(&self, request: BookingRequest) -> BookingResult {
        self.try_create_booking(request).await.into()
    }

    /// Runs the workflow, returning the typed error on failure.
    pub async fn try_create_booking(
        &self,
        request: BookingRequest,
    ) -> Result<CreatedBooking, BookingError> {
        let event_id = request.event_id.clone();
        let result = self.run(request).await;

        match &result {
            Ok(created) => info!(
                stage = %BookingStage::Done,
                event_id = %event_id,
                booking_id = %created.booking.id,
                "Booking created"
            ),
            Err(err) if err.is_unexpected() => error!(
                stage = %err.stage(),
                event_id = %event_id,
                details = err.details().unwrap_or_default(),
                "Failed to create booking"
            ),
            Err(err) => warn!(
                stage = %err.stage(),
                event_id = %event_id,
                code = ?err.code(),
                "Booking rejected: {}",
                err
            ),
        }
        result
    }

    async fn run(&self, request: BookingRequest) -> Result<CreatedBooking, BookingError> {
        debug!(stage = %BookingStage::ResolvingEvent, event_id = %request.event_id);
        let event = self
            .store
            .find_event_with_owner(&request.event_id)
            .await
            .map_err(|e| BookingError::from_store(BookingStage::ResolvingEvent, e))?
            .ok_or(BookingError::EventNotFound)?;

        debug!(
            stage = %BookingStage::ResolvingToken,
            owner = %event.owner.user_id
        );
        let token = self.tokens.get_token(&event.owner.external_id).await?;

        debug!(stage = %BookingStage::CreatingCalendarEvent, event_id = %event.id);
        let calendar_event = self
            .calendar
            .create_event(&token, calendar_request_for(&request, &event, Utc::now()))
            .await?;

        debug!(
            stage = %BookingStage::Persisting,
            google_event_id = %calendar_event.remote_event_id
        );
        let booking = self
            .store
            .insert_booking(NewBooking {
                event_id: event.id,
                user_id: event.owner.user_id,
                name: request.name,
                email: request.email,
                start_time: request.start_time,
                end_time: request.end_time,
                additional_info: request.additional_info,
                meet_link: calendar_event.meet_link.clone(),
                google_event_id: calendar_event.remote_event_id,
            })
            .await
            .map_err(|e| BookingError::from_store(BookingStage::Persisting, e))?;

        Ok(CreatedBooking {
            booking,
            meet_link: calendar_event.meet_link,
        })
    }
}

/// Summary line of the calendar event: `"<requester> - <event title>"`.
pub fn event_summary(requester_name: &str, event_title: &str) -> String {
    format!("{} - {}", requester_name, event_title)
}

/// Conference request id, unique per event and creation instant.
pub fn conference_request_id(event_id: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", event_id, now.timestamp_millis())
}

/// Calendar event for `request` on `event`, inviting the requester and the owner.
pub fn calendar_request_for(
    request: &BookingRequest,
    event: &SchedulingEvent,
    now: DateTime<Utc>,
) -> CalendarEventRequest {
    CalendarEventRequest {
        summary: event_summary(&request.name, &event.title),
        description: request.additional_info.clone().unwrap_or_default(),
        start_time: request.start_time,
        end_time: request.end_time,
        attendees: vec![request.email.clone(), event.owner.email.clone()],
        conference_request_id: conference_request_id(&event.id, now),
    }
}
