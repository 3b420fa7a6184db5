//! Moment window model and time classification.
//!
//! Everything here is a pure function of its inputs: the current time is
//! always passed in as a value, never read from a clock, so the
//! classification rules can be exercised deterministically.

use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::fetch::MomentPayload;

/// A payload that cannot be turned into a classifiable window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("payload is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("window end {end_epoch_ms} does not follow start {start_epoch_ms}")]
    Inverted {
        start_epoch_ms: i64,
        end_epoch_ms: i64,
    },
}

/// The authoritative schedule for the current day's moment.
///
/// Constructed fresh from every successful fetch and never mutated; the next
/// successful fetch supersedes it wholesale. On fetch failure no previous
/// window is retained for classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentWindow {
    /// Window open instant, milliseconds since the epoch. Inclusive.
    pub start_epoch_ms: i64,
    /// Window close instant, milliseconds since the epoch. Exclusive.
    pub end_epoch_ms: i64,
    /// Local-timezone rendering of the window start. Advisory only, never
    /// classified against.
    pub local_date_time: Option<String>,
}

impl MomentWindow {
    /// Validate a payload into a window: both timestamps present and
    /// `end > start`.
    pub fn from_payload(payload: &MomentPayload) -> Result<Self, WindowError> {
        let start_epoch_ms = payload
            .start_date
            .ok_or(WindowError::MissingField("startDate"))?
            .0;
        let end_epoch_ms = payload
            .end_date
            .ok_or(WindowError::MissingField("endDate"))?
            .0;

        if end_epoch_ms <= start_epoch_ms {
            return Err(WindowError::Inverted {
                start_epoch_ms,
                end_epoch_ms,
            });
        }

        Ok(Self {
            start_epoch_ms,
            end_epoch_ms,
            local_date_time: local_date_time_string(payload, start_epoch_ms),
        })
    }

    /// Width of the window in milliseconds. Always derived from the actual
    /// announcement; commonly about two minutes but never assumed fixed.
    pub fn duration_ms(&self) -> i64 {
        self.end_epoch_ms - self.start_epoch_ms
    }
}

/// Human-readable local rendering of the window start.
///
/// Prefers the endpoint's own `localDate`/`localTime` pair; falls back to
/// rendering the start instant in this machine's timezone.
fn local_date_time_string(payload: &MomentPayload, start_epoch_ms: i64) -> Option<String> {
    if let (Some(date), Some(time)) = (&payload.local_date, &payload.local_time) {
        let combined = format!("{date}T{time}:00");
        if let Ok(naive) = NaiveDateTime::parse_from_str(&combined, "%Y-%m-%dT%H:%M:%S") {
            return Some(naive.format("%Y-%m-%d %H:%M:%S").to_string());
        }
    }

    Utc.timestamp_millis_opt(start_epoch_ms)
        .single()
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Classification of the current instant against the moment window.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MomentState {
    /// The window has not opened yet
    Waiting,

    /// The window is open right now
    Now,

    /// The window has closed for today
    Past,

    /// No authoritative window this tick; see the snapshot's error detail
    Error,
}

impl MomentState {
    /// Canonical lowercase state value presented to consumers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Now => "now",
            Self::Past => "past",
            Self::Error => "error",
        }
    }

    /// Returns the display name for this state (without icon).
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Waiting => "Waiting",
            Self::Now => "Now",
            Self::Past => "Past",
            Self::Error => "Error",
        }
    }

    /// Returns the icon/symbol for this state.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Waiting => "󰔟 ",
            Self::Now => "󰄀 ",
            Self::Past => "󰒲 ",
            Self::Error => "󰀦 ",
        }
    }

    /// Returns true while the window is open.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Now)
    }

    /// Returns true when no window was available this tick.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Classify `now_ms` against the window.
///
/// Half-open semantics, evaluated in this precedence:
/// 1. `now < start` is `Waiting`
/// 2. `now < end` is `Now` (so `now == start` is `Now`)
/// 3. otherwise `Past` (so `now == end` is `Past`)
///
/// An inverted or zero-width window is refused rather than silently
/// classified; the caller substitutes the error state.
pub fn classify(window: &MomentWindow, now_ms: i64) -> Result<MomentState, WindowError> {
    if window.end_epoch_ms <= window.start_epoch_ms {
        return Err(WindowError::Inverted {
            start_epoch_ms: window.start_epoch_ms,
            end_epoch_ms: window.end_epoch_ms,
        });
    }

    Ok(if now_ms < window.start_epoch_ms {
        MomentState::Waiting
    } else if now_ms < window.end_epoch_ms {
        MomentState::Now
    } else {
        MomentState::Past
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::EpochMs;

    fn window(start: i64, end: i64) -> MomentWindow {
        MomentWindow {
            start_epoch_ms: start,
            end_epoch_ms: end,
            local_date_time: None,
        }
    }

    fn payload(start: Option<i64>, end: Option<i64>) -> MomentPayload {
        MomentPayload {
            start_date: start.map(EpochMs),
            end_date: end.map(EpochMs),
            local_date: None,
            local_time: None,
            region: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn before_the_window_is_waiting() {
        assert_eq!(
            classify(&window(1000, 1120), 500).unwrap(),
            MomentState::Waiting
        );
    }

    #[test]
    fn inside_the_window_is_now() {
        assert_eq!(classify(&window(1000, 1120), 1050).unwrap(), MomentState::Now);
    }

    #[test]
    fn after_the_window_is_past() {
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

    #[test]
    fn inverted_window_is_refused() {
        let err = classify(&window(1120, 1000), 1050).unwrap_err();
        assert_eq!(
            err,
            WindowError::Inverted {
                start_epoch_ms: 1120,
                end_epoch_ms: 1000,
            }
        );
    }

    #[test]
    fn zero_width_window_is_refused() {
        assert!(classify(&window(1000, 1000), 1000).is_err());
    }

    #[test]
    fn from_payload_requires_start_date() {
        assert_eq!(
            MomentWindow::from_payload(&payload(None, Some(1120))).unwrap_err(),
            WindowError::MissingField("startDate")
        );
    }

    #[test]
    fn from_payload_requires_end_date() {
        assert_eq!(
            MomentWindow::from_payload(&payload(Some(5000), None)).unwrap_err(),
            WindowError::MissingField("endDate")
        );
    }

    #[test]
    fn from_payload_enforces_window_invariant() {
        assert!(matches!(
            MomentWindow::from_payload(&payload(Some(1120), Some(1000))),
            Err(WindowError::Inverted { .. })
        ));
    }

    #[test]
    fn from_payload_builds_valid_window() {
        let built = MomentWindow::from_payload(&payload(Some(1000), Some(1120))).unwrap();
        assert_eq!(built.start_epoch_ms, 1000);
        assert_eq!(built.end_epoch_ms, 1120);
        assert_eq!(built.duration_ms(), 120);
    }

    #[test]
    fn local_date_time_prefers_endpoint_fields() {
        let mut with_local = payload(Some(1_690_909_409_000), Some(1_690_909_529_000));
        with_local.local_date = Some("2023-08-01".to_string());
        with_local.local_time = Some("19:03".to_string());

        let built = MomentWindow::from_payload(&with_local).unwrap();
        assert_eq!(built.local_date_time.as_deref(), Some("2023-08-01 19:03:00"));
    }

    #[test]
    fn local_date_time_falls_back_to_window_start() {
        let built =
            MomentWindow::from_payload(&payload(Some(1_690_909_409_000), Some(1_690_909_529_000)))
                .unwrap();
        // Exact text depends on the host timezone; the rendering just has to exist
        assert!(built.local_date_time.is_some());
    }

    #[test]
    fn state_strings_match_presented_values() {
        assert_eq!(MomentState::Waiting.as_str(), "waiting");
        assert_eq!(MomentState::Now.as_str(), "now");
        assert_eq!(MomentState::Past.as_str(), "past");
        assert_eq!(MomentState::Error.as_str(), "error");
        assert!(MomentState::Now.is_active());
        assert!(!MomentState::Past.is_active());
    }
}
