//! One fetch-classify-compose cycle.
//!
//! [`tick`] is the whole per-interval data flow: fetcher to classifier to
//! snapshot, with every failure collapsing into an error snapshot. It never
//! panics and never returns an error; the poll loop keeps calling it on
//! schedule regardless of the previous outcome, and no outcome is inferred
//! from history.

use crate::fetch::{FetchError, Fetcher, RawFetchResult};
use crate::moment::{MomentWindow, classify};
use crate::snapshot::Snapshot;
use crate::time_source;

/// Run one poll cycle for `region`, sampling the injected clock once.
pub fn tick(fetcher: &Fetcher, region: &str) -> Snapshot {
    compose_snapshot(fetcher.fetch(region), time_source::now_utc_ms())
}

/// Compose a fetch outcome and a sampled instant into a snapshot.
///
/// Pure: the current time is an argument, so every branch is testable
/// without a network or a clock.
pub fn compose_snapshot(result: Result<RawFetchResult, FetchError>, now_ms: i64) -> Snapshot {
    let fetched = match result {
        Ok(fetched) => fetched,
        Err(err) => return Snapshot::error(err.to_string(), now_ms),
    };

    let window = match MomentWindow::from_payload(&fetched.payload) {
        Ok(window) => window,
        Err(err) => return Snapshot::error(format!("malformed response: {err}"), now_ms),
    };

    match classify(&window, now_ms) {
        Ok(state) => Snapshot::success(state, window, fetched.payload, fetched.raw, now_ms),
        Err(err) => Snapshot::error(format!("malformed response: {err}"), now_ms),
    }
}
