//! Time source abstraction for supporting both real and simulated time.
//!
//! Classification never reads a clock of its own: the current instant is
//! always sampled through this module and passed down as a value, which keeps
//! the engine deterministic under test. The default source is real system
//! time; tests install a fast-forward simulated source instead. Interval
//! waiting is not part of the abstraction because the poll loop sleeps on its
//! signal channel, not on the clock.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current instant in UTC
    fn now_utc(&self) -> DateTime<Utc>;

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Simulated time source for tests: the clock only moves when told to.
pub struct SimulatedTimeSource {
    current: Mutex<DateTime<Utc>>,
}

impl SimulatedTimeSource {
    /// Create a simulated source frozen at the given instant.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Advance the simulated clock by exactly the given duration.
    pub fn advance(&self, duration: StdDuration) {
        let mut guard = self.current.lock().unwrap();
        *guard += ChronoDuration::milliseconds(duration.as_millis() as i64);
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap()
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

fn source() -> &'static Arc<dyn TimeSource> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource))
}

/// Get the current UTC time from the global time source
pub fn now_utc() -> DateTime<Utc> {
    source().now_utc()
}

/// Get the current UTC time as milliseconds since the Unix epoch
pub fn now_utc_ms() -> i64 {
    source().now_utc().timestamp_millis()
}

/// Check if we're running against a simulated clock
pub fn is_simulated() -> bool {
    source().is_simulated()
}
