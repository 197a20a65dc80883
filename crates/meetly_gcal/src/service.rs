// --- File: crates/meetly_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for Google Calendar.

use async_trait::async_trait;
use google_calendar3::api::{
    ConferenceData, ConferenceSolutionKey, CreateConferenceRequest, Event, EventAttendee,
    EventDateTime,
};
use meetly_common::services::{
    CalendarError, CalendarEventRequest, CalendarEventResult, CalendarService,
};
use meetly_config::GcalConfig;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::{hub_for_token, Connector};

/// Google error reasons that point at the credential rather than the request.
const CREDENTIAL_REASONS: &[&str] = &[
    "authError",
    "insufficientPermissions",
    "ACCESS_TOKEN_SCOPE_INSUFFICIENT",
];

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    connector: Connector,
    config: GcalConfig,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(connector: Connector, config: GcalConfig) -> Self {
        Self { connector, config }
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarService {
    /// Creates an event with a Meet conference in the configured calendar.
    ///
    /// The event is inserted with `conferenceDataVersion=1`, which is what
    /// makes Google honor the conference create request. Attendees are
    /// notified according to `send_updates`.
    ///
    /// # Errors
    ///
    /// * [`CalendarError::Unauthorized`] when Google rejects the token with 401
    /// * [`CalendarError::Credential`] for other credential problems
    /// * [`CalendarError::Api`] for everything else, including a response
    ///   without an event id
    async fn create_event(
        &self,
        token: &str,
        event: CalendarEventRequest,
    ) -> Result<CalendarEventResult, CalendarError> {
        let hub = hub_for_token(&self.connector, token);
        let new_event = build_event(&event, &self.config.conference_solution);

        debug!(
            "Inserting event '{}' into calendar {} (conference request {})",
            event.summary, self.config.calendar_id, event.conference_request_id
        );

        let (_response, created_event) = hub
            .events()
            .insert(new_event, &self.config.calendar_id)
            .conference_data_version(1)
            .send_updates(&self.config.send_updates)
            .doit()
            .await
            .map_err(classify_api_error)?;

        let meet_link = extract_meet_link(&created_event);
        let remote_event_id = created_event
            .id
            .ok_or_else(|| CalendarError::Api("created event has no id".to_string()))?;

        if meet_link.is_none() {
            warn!("Event {} was created without a conference link", remote_event_id);
        }
        info!("Created Google Calendar event {}", remote_event_id);

        Ok(CalendarEventResult {
            meet_link,
            remote_event_id,
        })
    }
}

/// Builds the Google event resource for `request`.
pub fn build_event(request: &CalendarEventRequest, conference_solution: &str) -> Event {
    Event {
        summary: Some(request.summary.clone()),
        description: Some(request.description.clone()),
        start: Some(EventDateTime {
            date_time: Some(request.start_time),
            time_zone: Some("UTC".to_string()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(request.end_time),
            time_zone: Some("UTC".to_string()),
            ..Default::default()
        }),
        attendees: Some(
            request
                .attendees
                .iter()
                .map(|email| EventAttendee {
                    email: Some(email.clone()),
                    ..Default::default()
                })
                .collect(),
        ),
        conference_data: Some(ConferenceData {
            create_request: Some(CreateConferenceRequest {
                request_id: Some(request.conference_request_id.clone()),
                conference_solution_key: Some(ConferenceSolutionKey {
                    type_: Some(conference_solution.to_string()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Returns the Meet link of a created event.
///
/// Prefers `hangoutLink`; falls back to the `video` entry point of the
/// conference data.
pub fn extract_meet_link(event: &Event) -> Option<String> {
    if let Some(link) = &event.hangout_link {
        return Some(link.clone());
    }
    event
        .conference_data
        .as_ref()?
        .entry_points
        .as_ref()?
        .iter()
        .find(|ep| ep.entry_point_type.as_deref() == Some("video"))
        .and_then(|ep| ep.uri.clone())
}

/// Maps a Google API client error to a [`CalendarError`].
pub fn classify_api_error(err: google_calendar3::Error) -> CalendarError {
    match err {
        google_calendar3::Error::BadRequest(value) => classify_error_value(&value),
        google_calendar3::Error::Failure(response) if response.status().as_u16() == 401 => {
            CalendarError::Unauthorized
        }
        google_calendar3::Error::MissingToken(e) => {
            CalendarError::Credential(format!("missing access token: {}", e))
        }
        other => CalendarError::Api(other.to_string()),
    }
}

/// Classifies a Google JSON error body (`{"error": {"code": .., "errors": [..]}}`).
pub fn classify_error_value(value: &Value) -> CalendarError {
    let error = &value["error"];
    let message = error["message"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string());

    if error["code"].as_u64() == Some(401) {
        return CalendarError::Unauthorized;
    }

    let credential_problem = error["errors"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|e| e["reason"].as_str())
        .chain(
            error["details"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|d| d["reason"].as_str()),
        )
        .any(|reason| CREDENTIAL_REASONS.contains(&reason));

    if credential_problem {
        CalendarError::Credential(message)
    } else {
        CalendarError::Api(message)
    }
}
