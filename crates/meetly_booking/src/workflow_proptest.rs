#[cfg(test)]
mod tests {
    use crate::result::{BookingError, BookingResult, BookingStage};
    use crate::workflow::{calendar_request_for, conference_request_id};
    use chrono::{Duration, TimeZone, Utc};
    use meetly_common::models::{BookingRequest, EventOwner, SchedulingEvent};
    use meetly_common::HttpStatusCode;
    use proptest::prelude::*;

    fn any_booking_error() -> impl Strategy<Value = BookingError> {
        prop_oneof![
            Just(BookingError::EventNotFound),
            Just(BookingError::NoGoogleConnection),
            ".{0,20}".prop_map(BookingError::GoogleAuthRequired),
            ".{0,20}".prop_map(BookingError::GoogleAuthError),
            Just(BookingError::GoogleTokenExpired),
            ".{0,20}".prop_map(BookingError::CalendarCredential),
            ".{0,20}".prop_map(|m| BookingError::unexpected(BookingStage::Persisting, m)),
        ]
    }

    proptest! {
        #[test]
        fn prop_calendar_request_mirrors_booking(
            event_id in "[A-Za-z0-9_]{1,12}",
            name in "[A-Za-z ]{1,20}",
            title in "[A-Za-z ]{1,20}",
            millis in 0i64..4_102_444_800_000,
            duration_minutes in 1i64..480,
        ) {
            let now = Utc.timestamp_millis_opt(millis).unwrap();
            let start = Utc.with_ymd_and_hms(2025, 5, 15, 10, 0, 0).unwrap();
            let request = BookingRequest {
                event_id: event_id.clone(),
                name: name.clone(),
                email: "ada@example.com".to_string(),
                start_time: start,
                end_time: start + Duration::minutes(duration_minutes),
                additional_info: None,
            };
            let event = SchedulingEvent {
                id: event_id.clone(),
                title: title.clone(),
                owner: EventOwner {
                    user_id: "u1".to_string(),
                    external_id: "user_ext_1".to_string(),
                    email: "owner@example.com".to_string(),
                    name: "Owner".to_string(),
                },
            };

            let calendar_request = calendar_request_for(&request, &event, now);

            prop_assert_eq!(calendar_request.summary, format!("{} - {}", name, title));
            prop_assert_eq!(
                calendar_request.end_time - calendar_request.start_time,
                Duration::minutes(duration_minutes)
            );
            prop_assert_eq!(
                calendar_request.attendees,
                vec!["ada@example.com".to_string(), "owner@example.com".to_string()]
            );
            prop_assert_eq!(
                calendar_request.conference_request_id,
                conference_request_id(&event_id, now)
            );
        }

        #[test]
        fn prop_failed_results_never_carry_a_booking(err in any_booking_error()) {
            let status = err.status_code();
            let reauth = err.requires_reauth();
            let result = BookingResult::from(err);

            prop_assert!(!result.success);
            prop_assert!(result.booking.is_none());
            prop_assert!(result.error.is_some());
            prop_assert!((400..600).contains(&status));
            // 401 is reserved for failures that ask for reauthorization
            prop_assert_eq!(status == 401, reauth == Some(true));
        }
    }

    #[test]
    fn test_conference_request_id_uses_unix_millis() {
        let now = Utc.with_ymd_and_hms(2025, 5, 15, 10, 0, 0).unwrap();
        assert_eq!(conference_request_id("E1", now), "E1-1747303200000");
    }
}
