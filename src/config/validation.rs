//! Configuration validation.
//!
//! Rejects configurations the engine cannot honor: an empty region, polling
//! cadences outside sane bounds, or a past cadence shorter than the active
//! one.

use anyhow::Result;

use super::Config;
use crate::constants::*;

/// Validate a loaded configuration before it is used.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(region) = &config.region
        && region.trim().is_empty()
    {
        anyhow::bail!("region must be a non-empty identifier");
    }

    let poll_interval = config.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL);
    if !(MINIMUM_POLL_INTERVAL..=MAXIMUM_POLL_INTERVAL).contains(&poll_interval) {
        anyhow::bail!(
            "poll_interval ({poll_interval} s) must be between {MINIMUM_POLL_INTERVAL} and {MAXIMUM_POLL_INTERVAL} seconds"
        );
    }

    let past_poll_interval = config
        .past_poll_interval
        .unwrap_or(DEFAULT_PAST_POLL_INTERVAL);
    if past_poll_interval < poll_interval {
        anyhow::bail!(
            "past_poll_interval ({past_poll_interval} s) must not be shorter than poll_interval ({poll_interval} s)"
        );
    }
    if past_poll_interval > MAXIMUM_PAST_POLL_INTERVAL {
        anyhow::bail!(
            "past_poll_interval ({past_poll_interval} s) must be at most {MAXIMUM_PAST_POLL_INTERVAL} seconds"
        );
    }

    if let Some(timeout) = config.fetch_timeout
        && !(MINIMUM_FETCH_TIMEOUT..=MAXIMUM_FETCH_TIMEOUT).contains(&timeout)
    {
        anyhow::bail!(
            "fetch_timeout ({timeout} s) must be between {MINIMUM_FETCH_TIMEOUT} and {MAXIMUM_FETCH_TIMEOUT} seconds"
        );
    }

    Ok(())
}
