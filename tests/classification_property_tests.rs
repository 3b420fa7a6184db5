//! Property tests for the moment classification rules.

use momentr::moment::{MomentState, MomentWindow, classify};
use proptest::prelude::*;

fn window(start: i64, end: i64) -> MomentWindow {
    MomentWindow {
        start_epoch_ms: start,
        end_epoch_ms: end,
        local_date_time: None,
    }
}

/// Generate valid windows: start strictly before end, widths up to a day.
fn window_strategy() -> impl Strategy<Value = (i64, i64)> {
    (0i64..10_000_000, 1i64..=86_400_000).prop_map(|(start, width)| (start, start + width))
}

proptest! {
    /// Before the window opens the state is always waiting.
    #[test]
    fn before_start_is_waiting(
        (start, end) in window_strategy(),
        offset in 1i64..1_000_000,
    ) {
        let now = start - offset;
        prop_assert_eq!(classify(&window(start, end), now).unwrap(), MomentState::Waiting);
    }

    /// Anywhere inside [start, end) the state is now.
    #[test]
    fn inside_window_is_now(
        (start, end) in window_strategy(),
        frac in 0.0f64..1.0,
    ) {
        let now = start + ((end - start) as f64 * frac) as i64;
        prop_assert!(now < end);
        prop_assert_eq!(classify(&window(start, end), now).unwrap(), MomentState::Now);
    }

    /// At or after the end the state is always past.
    #[test]
    fn at_or_after_end_is_past(
        (start, end) in window_strategy(),
        offset in 0i64..1_000_000,
    ) {
        let now = end + offset;
        prop_assert_eq!(classify(&window(start, end), now).unwrap(), MomentState::Past);
    }

    /// Classification is a pure function: identical inputs, identical output.
    #[test]
    fn classify_is_idempotent(
        (start, end) in window_strategy(),
        now in 0i64..100_000_000,
    ) {
        let w = window(start, end);
        prop_assert_eq!(classify(&w, now).unwrap(), classify(&w, now).unwrap());
    }

    /// A window that does not satisfy end > start is always refused.
    #[test]
    fn malformed_window_is_refused(
        start in 0i64..10_000_000,
        shrink in 0i64..1_000_000,
        now in 0i64..100_000_000,
    ) {
        let w = window(start, start - shrink);
        prop_assert!(classify(&w, now).is_err());
    }
}

#[test]
fn scenario_before_the_window() {
    assert_eq!(
        classify(&window(1000, 1120), 500).unwrap(),
        MomentState::Waiting
    );
}

#[test]
fn scenario_inside_the_window() {
    assert_eq!(classify(&window(1000, 1120), 1050).unwrap(), MomentState::Now);
}

#[test]
fn scenario_after_the_window() {
    assert_eq!(classify(&window(1000, 1120), 1200).unwrap(), MomentState::Past);
}

#[test]
fn start_boundary_is_inclusive() {
    assert_eq!(classify(&window(1000, 1120), 1000).unwrap(), MomentState::Now);
}

#[test]
fn end_boundary_is_exclusive() {
    assert_eq!(classify(&window(1000, 1120), 1120).unwrap(), MomentState::Past);
}
