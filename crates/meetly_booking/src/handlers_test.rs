#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use crate::workflow::BookingCreationWorkflow;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::Utc;
    use meetly_common::models::{Booking, EventOwner, SchedulingEvent};
    use meetly_common::services::{CalendarError, CalendarEventResult, TokenError};
    use meetly_common::{MockAuthTokenProvider, MockBookingStore, MockCalendarService};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn owner_event() -> SchedulingEvent {
        SchedulingEvent {
            id: "E1".to_string(),
            title: "Intro call".to_string(),
            owner: EventOwner {
                user_id: "u1".to_string(),
                external_id: "user_ext_1".to_string(),
                email: "owner@example.com".to_string(),
                name: "Owner".to_string(),
            },
        }
    }

    fn booking_body(event_id: &str) -> Body {
        Body::from(
            json!({
                "eventId": event_id,
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "startTime": "2025-05-15T10:00:00Z",
                "endTime": "2025-05-15T10:30:00Z"
            })
            .to_string(),
        )
    }

    async fn post_booking(
        store: MockBookingStore,
        tokens: MockAuthTokenProvider,
        calendar: MockCalendarService,
        body: Body,
    ) -> (StatusCode, Value) {
        let workflow =
            BookingCreationWorkflow::new(Arc::new(store), Arc::new(tokens), Arc::new(calendar));
        let response = routes(Arc::new(workflow))
            .oneshot(
                Request::post("/bookings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn store_with_event() -> MockBookingStore {
        let mut store = MockBookingStore::new();
        store
            .expect_find_event_with_owner()
            .returning(|_| Ok(Some(owner_event())));
        store
    }

    fn tokens(result: Result<String, TokenError>) -> MockAuthTokenProvider {
        let mut tokens = MockAuthTokenProvider::new();
        tokens
            .expect_get_token()
            .returning(move |_| result.clone());
        tokens
    }

    #[tokio::test]
    async fn test_created_booking_returns_201() {
        let mut store = store_with_event();
        store
            .expect_insert_booking()
            .returning(|new| Ok(Booking::from_new("b1".to_string(), new, Utc::now())));
        let mut calendar = MockCalendarService::new();
        calendar.expect_create_event().returning(|_, _| {
            Ok(CalendarEventResult {
                meet_link: Some("https://meet/x".to_string()),
                remote_event_id: "G1".to_string(),
            })
        });

        let (status, body) = post_booking(
            store,
            tokens(Ok("ya29.token".to_string())),
            calendar,
            booking_body("E1"),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["meetLink"], "https://meet/x");
        assert_eq!(body["booking"]["googleEventId"], "G1");
    }

    #[tokio::test]
    async fn test_unknown_event_returns_404() {
        let mut store = MockBookingStore::new();
        store.expect_find_event_with_owner().returning(|_| Ok(None));

        let (status, body) = post_booking(
            store,
            MockAuthTokenProvider::new(),
            MockCalendarService::new(),
            booking_body("E2"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "error": "Event not found" }));
    }

    #[tokio::test]
    async fn test_missing_connection_returns_412() {
        let (status, body) = post_booking(
            store_with_event(),
            tokens(Err(TokenError::NoConnection)),
            MockCalendarService::new(),
            booking_body("E1"),
        )
        .await;

        assert_eq!(status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(body["code"], "NO_GOOGLE_CONNECTION");
        assert_eq!(body["requiresReauth"], false);
    }

    #[tokio::test]
    async fn test_expired_calendar_token_returns_401() {
        let mut calendar = MockCalendarService::new();
        calendar
            .expect_create_event()
            .returning(|_, _| Err(CalendarError::Unauthorized));

        let (status, body) = post_booking(
            store_with_event(),
            tokens(Ok("ya29.token".to_string())),
            calendar,
            booking_body("E1"),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "GOOGLE_TOKEN_EXPIRED");
        assert_eq!(body["requiresReauth"], true);
    }

    #[tokio::test]
    async fn test_identity_provider_failure_returns_502() {
        let (status, body) = post_booking(
            store_with_event(),
            tokens(Err(TokenError::Other("HTTP 503: unavailable".to_string()))),
            MockCalendarService::new(),
            booking_body("E1"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "GOOGLE_AUTH_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let (status, _) = post_booking(
            MockBookingStore::new(),
            MockAuthTokenProvider::new(),
            MockCalendarService::new(),
            Body::from(r#"{"eventId": "E1"}"#),
        )
        .await;

        assert!(status.is_client_error());
    }
}
