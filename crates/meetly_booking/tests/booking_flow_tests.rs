use meetly_booking::{BookingCreationWorkflow, ErrorCode};
use meetly_common::services::{CalendarError, TokenError};
use meetly_common::MockCalendarService;
use serde_json::json;
use std::sync::Arc;


#[tokio::test]
async fn test_booking_is_persisted_with_calendar_values() {
    let store = fixtures::seeded_store().await;
    let workflow = BookingCreationWorkflow::new(
        Arc::new(store.clone()),
        Arc::new(fixtures::token_provider(Ok("ya29.token".to_string()))),
        Arc::new(fixtures::meet_calendar(1)),
    );

    let result = workflow
        .create_booking(fixtures::booking_request("E1"))
        .await;

    assert!(result.success);
    assert_eq!(result.meet_link.as_deref(), Some("https://meet/x"));
    let booking = result.booking.expect("booking");
    assert_eq!(booking.google_event_id, "G1");

    let stored = store
        .find_booking(&booking.id)
        .await
        .expect("query")
        .expect("persisted booking");
    assert_eq!(stored.meet_link.as_deref(), Some("https://meet/x"));
    assert_eq!(stored.user_id, "u1");
    assert_eq!(stored.additional_info.as_deref(), Some("Bring the notes"));
}

#[tokio::test]
async fn test_unknown_event_result_is_exact() {
    let store = fixtures::seeded_store().await;
    let mut calendar = MockCalendarService::new();
    calendar.expect_create_event().never();
    let workflow = BookingCreationWorkflow::new(
        Arc::new(store.clone()),
        Arc::new(fixtures::token_provider(Ok("unused".to_string()))),
        Arc::new(calendar),
    );

    let result = workflow
        .create_booking(fixtures::booking_request("E2"))
        .await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "success": false, "error": "Event not found" })
    );
    assert_eq!(store.count_bookings_for_event("E2").await.unwrap(), 0);
}

#[tokio::test]
async fn test_repeated_requests_create_repeated_bookings() {
    let store = fixtures::seeded_store().await;
    let workflow = BookingCreationWorkflow::new(
        Arc::new(store.clone()),
        Arc::new(fixtures::token_provider(Ok("ya29.token".to_string()))),
        Arc::new(fixtures::meet_calendar(2)),
    );

    let first = workflow
        .try_create_booking(fixtures::booking_request("E1"))
        .await
        .expect("first booking");
    let second = workflow
        .try_create_booking(fixtures::booking_request("E1"))
        .await
        .expect("second booking");

    assert_ne!(first.booking.id, second.booking.id);
    assert_eq!(store.count_bookings_for_event("E1").await.unwrap(), 2);
}

#[tokio::test]
async fn test_auth_failures_leave_no_booking() {
    let store = fixtures::seeded_store().await;

    let missing = BookingCreationWorkflow::new(
        Arc::new(store.clone()),
        Arc::new(fixtures::token_provider(Err(TokenError::NoConnection))),
        Arc::new(fixtures::meet_calendar(0)),
    )
    .create_booking(fixtures::booking_request("E1"))
    .await;
    assert_eq!(missing.code, Some(ErrorCode::NoGoogleConnection));

    let mut calendar = MockCalendarService::new();
    calendar
        .expect_create_event()
        .times(1)
        .returning(|_, _| Err(CalendarError::Unauthorized));
    let expired = BookingCreationWorkflow::new(
        Arc::new(store.clone()),
        Arc::new(fixtures::token_provider(Ok("ya29.stale".to_string()))),
        Arc::new(calendar),
    )
    .create_booking(fixtures::booking_request("E1"))
    .await;
    assert_eq!(expired.code, Some(ErrorCode::GoogleTokenExpired));
    assert_eq!(expired.requires_reauth, Some(true));

    assert_eq!(store.count_bookings_for_event("E1").await.unwrap(), 0);
}
