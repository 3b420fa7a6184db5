//! End-to-end snapshot composition: fetch outcomes through parsing and
//! classification down to the presentation attribute map.

use momentr::fetch::{FetchError, RawFetchResult, parse_body};
use momentr::moment::MomentState;
use momentr::tick::compose_snapshot;
use serde_json::json;

fn fetched(raw: &str) -> Result<RawFetchResult, FetchError> {
    parse_body(raw).map(|payload| RawFetchResult {
        raw: raw.to_string(),
        payload,
    })
}

#[test]
fn transport_failure_produces_error_snapshot() {
    let result = Err(FetchError::Transport {
        detail: "connection refused".into(),
    });
    let snapshot = compose_snapshot(result, 500);

    assert_eq!(snapshot.state, MomentState::Error);
    assert_eq!(snapshot.current_time_utc_ms, 500);
    assert!(snapshot.window.is_none());
    assert!(snapshot.parsed.is_none());
    assert!(snapshot.raw.is_none());
    assert!(!snapshot.error_detail.as_deref().unwrap().is_empty());
}

#[test]
fn missing_end_date_produces_error_snapshot_naming_the_field() {
    let snapshot = compose_snapshot(fetched(r#"{"startDate": 5000}"#), 500);

    assert_eq!(snapshot.state, MomentState::Error);
    assert!(snapshot.window.is_none());
    let detail = snapshot.error_detail.unwrap();
    assert!(
        detail.contains("endDate"),
        "detail should name the missing field: {detail}"
    );
}

#[test]
fn non_json_body_produces_error_snapshot() {
    let snapshot = compose_snapshot(fetched("<html>busy</html>"), 500);

    assert_eq!(snapshot.state, MomentState::Error);
    assert!(snapshot.error_detail.is_some());
}

#[test]
fn inverted_window_never_classifies_as_past() {
    let snapshot = compose_snapshot(fetched(r#"{"startDate": 2000, "endDate": 1000}"#), 3000);

    assert_eq!(snapshot.state, MomentState::Error);
}

#[test]
fn consecutive_ticks_never_share_windows() {
    let first = compose_snapshot(fetched(r#"{"startDate": 1000, "endDate": 1120}"#), 1050);
    let second = compose_snapshot(fetched(r#"{"startDate": 2000, "endDate": 2120}"#), 1500);

    assert_eq!(first.state, MomentState::Now);
    assert_eq!(second.state, MomentState::Waiting);
    assert_eq!(first.window.as_ref().unwrap().start_epoch_ms, 1000);
    assert_eq!(second.window.as_ref().unwrap().start_epoch_ms, 2000);
}

#[test]
fn successful_snapshot_exposes_the_presentation_attribute_set() {
    let raw = concat!(
        r#"{"startDate":"2023-08-01T17:03:29.000Z","#,
        r#""endDate":"2023-08-01T17:05:29.000Z","#,
        r#""localDate":"2023-08-01","localTime":"19:03","region":"europe-west"}"#
    );
    let snapshot = compose_snapshot(fetched(raw), 1_690_909_410_000);
    let attrs = snapshot.attributes();

    assert_eq!(attrs["state"], "now");
    assert_eq!(attrs["startDate"], json!(1_690_909_409_000i64));
    assert_eq!(attrs["endDate"], json!(1_690_909_529_000i64));
    assert_eq!(attrs["current_time_utc"], json!(1_690_909_410_000i64));
    assert_eq!(attrs["localDateTime"], "2023-08-01 19:03:00");
    assert_eq!(attrs["api_parsed"]["region"], "europe-west");
    assert!(attrs["api_raw"].as_str().unwrap().contains("europe-west"));
    assert!(attrs.get("error_detail").is_none());
}

#[test]
fn error_snapshot_attributes_carry_only_state_time_and_detail() {
    let snapshot = compose_snapshot(
        Err(FetchError::Transport {
            detail: "timed out".into(),
        }),
        42,
    );
    let attrs = snapshot.attributes();

    assert_eq!(attrs["state"], "error");
    assert_eq!(attrs["current_time_utc"], json!(42));
    assert!(attrs.get("startDate").is_none());
    assert!(attrs.get("api_parsed").is_none());
    assert!(attrs.get("api_raw").is_none());
    assert!(attrs["error_detail"].as_str().unwrap().contains("timed out"));
}
