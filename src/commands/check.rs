//! `momentr check`: run a single tick and print the snapshot.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::constants::DEFAULT_FETCH_TIMEOUT;
use crate::fetch::Fetcher;
use crate::logger::Log;
use crate::tick::tick;

/// Run one fetch-classify-compose cycle and print the snapshot attribute map
/// as pretty JSON on stdout.
///
/// The exit code is 0 even for an error-state snapshot: the error state is
/// data for the consumer, not a process failure.
pub fn handle_check_command(debug_enabled: bool) -> Result<()> {
    // Decorative log lines would corrupt the JSON output
    if !debug_enabled {
        Log::set_enabled(false);
    }

    let config = Config::load()?;
    let timeout = Duration::from_secs(config.fetch_timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT));
    let fetcher = Fetcher::new(timeout).context("failed to initialize fetcher")?;

    let snapshot = tick(&fetcher, config.region());

    Log::set_enabled(true);
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot.attributes())
            .context("failed to serialize snapshot")?
    );

    Ok(())
}
