#[cfg(test)]
mod tests {
    use crate::service::{build_event, classify_error_value};
    use chrono::{Duration, TimeZone, Utc};
    use meetly_common::services::{CalendarError, CalendarEventRequest};
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #[test]
        fn prop_event_times_and_attendees_survive(
            offset_minutes in 0i64..525_600,
            duration_minutes in 1i64..480,
            attendees in proptest::collection::vec("[a-z]{1,8}@[a-z]{1,8}\\.com", 0..5),
        ) {
            let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(offset_minutes);
            let request = CalendarEventRequest {
                summary: "s".to_string(),
                description: String::new(),
                start_time: start,
                end_time: start + Duration::minutes(duration_minutes),
                attendees: attendees.clone(),
                conference_request_id: "r".to_string(),
            };

            let event = build_event(&request, "hangoutsMeet");

            prop_assert_eq!(event.start.and_then(|s| s.date_time), Some(request.start_time));
            prop_assert_eq!(event.end.and_then(|e| e.date_time), Some(request.end_time));
            let emails: Vec<String> = event
                .attendees
                .unwrap_or_default()
                .into_iter()
                .filter_map(|a| a.email)
                .collect();
            prop_assert_eq!(emails, attendees);
        }

        #[test]
        fn prop_only_401_is_unauthorized(code in 400u64..600) {
            let body = json!({ "error": { "code": code, "message": "m" } });
            let classified = classify_error_value(&body);
            prop_assert_eq!(classified == CalendarError::Unauthorized, code == 401);
        }
    }
}
