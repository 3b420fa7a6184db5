//! The polling loop: one tick per interval, cadence adapted to the state.
//!
//! Data flows one way per tick: timer, fetch, classify, snapshot, log. No
//! snapshot history is kept; the loop only remembers the previous state value
//! to keep the log readable across unchanged ticks.

use std::sync::atomic::Ordering;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::constants::{DEFAULT_FETCH_TIMEOUT, DEFAULT_PAST_POLL_INTERVAL, DEFAULT_POLL_INTERVAL};
use crate::fetch::Fetcher;
use crate::moment::MomentState;
use crate::signals::{SignalMessage, SignalState};
use crate::snapshot::Snapshot;
use crate::tick::tick;

/// Run the poll loop until a shutdown signal arrives.
pub fn run_loop(config: &Config, signal_state: &SignalState, debug_enabled: bool) -> Result<()> {
    let timeout = Duration::from_secs(config.fetch_timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT));
    let fetcher = Fetcher::new(timeout).context("failed to initialize fetcher")?;
    let region = config.region().to_string();

    let mut previous_state: Option<MomentState> = None;

    while signal_state.running.load(Ordering::SeqCst) {
        let snapshot = tick(&fetcher, &region);
        log_snapshot(&snapshot, previous_state, debug_enabled);

        let sleep_duration = next_interval(config, snapshot.state);
        if previous_state != Some(snapshot.state) {
            log_decorated!("Polling every {} seconds", sleep_duration.as_secs());
        }
        previous_state = Some(snapshot.state);

        // Block until a signal arrives or the interval expires
        match signal_state.signal_receiver.recv_timeout(sleep_duration) {
            Ok(SignalMessage::Shutdown) => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if signal_state.running.load(Ordering::SeqCst) {
                    log_pipe!();
                    log_warning!("Signal handler disconnected unexpectedly");
                    log_indented!("Termination signals will no longer be processed");
                }
                // `running` still gates the loop either way
            }
        }
    }

    Ok(())
}

/// Interval before the next tick, chosen from the just-produced snapshot:
/// the short cadence while the moment is upcoming, active, or errored, the
/// long one once it has passed for the day.
pub fn next_interval(config: &Config, state: MomentState) -> Duration {
    let secs = match state {
        MomentState::Past => config
            .past_poll_interval
            .unwrap_or(DEFAULT_PAST_POLL_INTERVAL),
        _ => config.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
    };
    Duration::from_secs(secs)
}

/// Log one snapshot, opening a new block on state changes and staying quiet
/// on unchanged ticks unless debug output is enabled.
fn log_snapshot(snapshot: &Snapshot, previous_state: Option<MomentState>, debug_enabled: bool) {
    let state = snapshot.state;
    let changed = previous_state != Some(state);

    if state.is_error() {
        let detail = snapshot.error_detail.as_deref().unwrap_or("unknown failure");
        if changed {
            log_pipe!();
            log_warning!("Tick failed: {}", detail);
            log_indented!("Will retry on the next poll");
        } else if debug_enabled {
            log_decorated!("Still failing: {}", detail);
        }
        return;
    }

    if changed {
        log_block_start!("Moment {}{}", state.symbol(), state.display_name());
        if let Some(window) = &snapshot.window {
            if let Some(local) = &window.local_date_time {
                log_indented!("Window start (local): {}", local);
            }
            log_indented!(
                "Window: {}..{} ({} ms wide)",
                window.start_epoch_ms,
                window.end_epoch_ms,
                window.duration_ms()
            );
        }
    } else if debug_enabled {
        log_decorated!("Moment still {}", state.display_name());
    }

    if debug_enabled {
        log_debug!("current_time_utc: {} ms", snapshot.current_time_utc_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(poll: Option<u64>, past: Option<u64>) -> Config {
        Config {
            region: None,
            poll_interval: poll,
            past_poll_interval: past,
            fetch_timeout: None,
        }
    }

    #[test]
    fn past_state_selects_the_long_cadence() {
        let config = config(Some(5), Some(3600));
        assert_eq!(
            next_interval(&config, MomentState::Past),
            Duration::from_secs(3600)
        );
    }

    #[test]
    fn other_states_select_the_short_cadence() {
        let config = config(Some(5), Some(3600));
        for state in [MomentState::Waiting, MomentState::Now, MomentState::Error] {
            assert_eq!(next_interval(&config, state), Duration::from_secs(5));
        }
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(None, None);
        assert_eq!(
            next_interval(&config, MomentState::Waiting),
            Duration::from_secs(DEFAULT_POLL_INTERVAL)
        );
        assert_eq!(
            next_interval(&config, MomentState::Past),
            Duration::from_secs(DEFAULT_PAST_POLL_INTERVAL)
        );
    }
}
