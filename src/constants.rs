//! Shared constants: endpoint template, polling defaults, and validation
//! bounds.
//!
//! Defaults mirror the cadence the remote schedule calls for: the moment
//! window is a couple of minutes wide, so the short interval has to be tight
//! enough to catch it opening, while the long interval only needs to roll
//! over to the next day's announcement.

/// Base URL of the moment endpoint; the region is appended as the final path
/// segment.
pub const ENDPOINT_BASE: &str = "https://mobile-l7.bereal.com/api/bereal/moments/last";

/// Region polled when the configuration does not name one.
pub const DEFAULT_REGION: &str = "us-central";

/// Seconds between polls while the moment is upcoming, active, or errored.
pub const DEFAULT_POLL_INTERVAL: u64 = 5;

/// Seconds between polls once the day's moment has passed.
pub const DEFAULT_PAST_POLL_INTERVAL: u64 = 7200;

/// Transport timeout for a single fetch, in seconds.
pub const DEFAULT_FETCH_TIMEOUT: u64 = 10;

pub const MINIMUM_POLL_INTERVAL: u64 = 1;
pub const MAXIMUM_POLL_INTERVAL: u64 = 300;

pub const MAXIMUM_PAST_POLL_INTERVAL: u64 = 86_400;

pub const MINIMUM_FETCH_TIMEOUT: u64 = 1;
pub const MAXIMUM_FETCH_TIMEOUT: u64 = 120;
