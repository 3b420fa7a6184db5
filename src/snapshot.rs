//! Per-tick snapshot: the externally visible result of one poll cycle.

use serde::Serialize;
use serde_json::{Value, json};

use crate::fetch::MomentPayload;
use crate::moment::{MomentState, MomentWindow};

/// One tick's complete classification-plus-data result.
///
/// Immutable once produced; the next tick replaces it wholesale. On error the
/// window and payloads are absent: consumers always see either fresh
/// authoritative data or an explicit error, never silently stale data.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub state: MomentState,
    /// The instant classification was computed against, epoch milliseconds.
    pub current_time_utc_ms: i64,
    pub window: Option<MomentWindow>,
    pub parsed: Option<MomentPayload>,
    pub raw: Option<String>,
    /// Present only when `state` is `Error`.
    pub error_detail: Option<String>,
}

impl Snapshot {
    /// Snapshot for a successfully fetched and classified window.
    pub fn success(
        state: MomentState,
        window: MomentWindow,
        payload: MomentPayload,
        raw: String,
        now_ms: i64,
    ) -> Self {
        Self {
            state,
            current_time_utc_ms: now_ms,
            window: Some(window),
            parsed: Some(payload),
            raw: Some(raw),
            error_detail: None,
        }
    }

    /// Error snapshot: window and payloads absent, detail present.
    pub fn error(detail: impl Into<String>, now_ms: i64) -> Self {
        Self {
            state: MomentState::Error,
            current_time_utc_ms: now_ms,
            window: None,
            parsed: None,
            raw: None,
            error_detail: Some(detail.into()),
        }
    }

    /// Attribute map for the presentation surface.
    ///
    /// `state` is the primary value; the remaining attributes mirror the
    /// endpoint's data for observability. Absent values are omitted rather
    /// than serialized as null.
    pub fn attributes(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("state".into(), json!(self.state));
        map.insert("current_time_utc".into(), json!(self.current_time_utc_ms));

        if let Some(window) = &self.window {
            map.insert("startDate".into(), json!(window.start_epoch_ms));
            map.insert("endDate".into(), json!(window.end_epoch_ms));
            if let Some(local) = &window.local_date_time {
                map.insert("localDateTime".into(), json!(local));
            }
        }
        if let Some(parsed) = &self.parsed {
            map.insert("api_parsed".into(), json!(parsed));
        }
        if let Some(raw) = &self.raw {
            map.insert("api_raw".into(), json!(raw));
        }
        if let Some(detail) = &self.error_detail {
            map.insert("error_detail".into(), json!(detail));
        }

        Value::Object(map)
    }
}
