//! Configuration system for momentr.
//!
//! Handles the TOML-based configuration file, default value generation, and
//! validation.
//!
//! ## Configuration Sources
//!
//! The configuration is read from `momentr.toml` under the standard config
//! directory (`$XDG_CONFIG_HOME/momentr/` on Linux, falling back to
//! `~/.config/momentr/`), or under the directory given with `--config`. A
//! default file with commented settings is created on first run.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Moment]
//! region = "us-central"     # Region schedule to poll (opaque identifier)
//!
//! #[Polling]
//! poll_interval = 5         # Seconds between polls while waiting/now/error (1-300)
//! past_poll_interval = 7200 # Seconds between polls once past (up to 86400)
//! fetch_timeout = 10        # Transport timeout per fetch in seconds (1-120)
//! ```
//!
//! The region and intervals are immutable for the process lifetime; changing
//! them means restarting the process.

pub mod validation;

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::constants::*;

pub use validation::validate_config;

/// Custom configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
/// Returns an error if already set.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("configuration directory already set"))
}

/// Path of `momentr.toml`, honoring the `--config` override.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(Some(dir)) = CONFIG_DIR.get() {
        return Ok(dir.join("momentr.toml"));
    }

    let base = dirs::config_dir().context("could not determine config directory")?;
    Ok(base.join("momentr").join("momentr.toml"))
}

/// Application configuration. Every field is optional and falls back to the
/// defaults in `constants`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Region identifier substituted into the endpoint path. Treated as
    /// opaque; anything beyond non-emptiness is the server's to judge.
    pub region: Option<String>,
    /// Seconds between polls while the moment is upcoming, active, or errored.
    pub poll_interval: Option<u64>,
    /// Seconds between polls once the moment has passed for the day.
    pub past_poll_interval: Option<u64>,
    /// Transport timeout for one fetch, in seconds.
    pub fetch_timeout: Option<u64>,
}

impl Config {
    /// Load configuration, creating a default file if none exists.
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;
        if !path.exists() {
            create_default_config(&path).context("failed to create default config during load")?;
        }
        Self::load_from_path(&path)
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Effective region.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        log_indented!("Region: {}", self.region());
        log_indented!(
            "Endpoint: {}",
            crate::fetch::Fetcher::endpoint_url(self.region())
        );
        log_indented!(
            "Poll interval: {} seconds",
            self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL)
        );
        log_indented!(
            "Past poll interval: {} seconds",
            self.past_poll_interval.unwrap_or(DEFAULT_PAST_POLL_INTERVAL)
        );
        log_indented!(
            "Fetch timeout: {} seconds",
            self.fetch_timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT)
        );
    }
}

/// Write a default config file with commented settings.
pub fn create_default_config(path: &PathBuf) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    let content = format!(
        "#[Moment]\n\
         region = \"{DEFAULT_REGION}\"      # Region schedule to poll (opaque identifier)\n\
         \n\
         #[Polling]\n\
         poll_interval = {DEFAULT_POLL_INTERVAL}            # Seconds between polls while waiting/now/error ({MINIMUM_POLL_INTERVAL}-{MAXIMUM_POLL_INTERVAL})\n\
         past_poll_interval = {DEFAULT_PAST_POLL_INTERVAL}  # Seconds between polls once past (up to {MAXIMUM_PAST_POLL_INTERVAL})\n\
         fetch_timeout = {DEFAULT_FETCH_TIMEOUT}           # Transport timeout per fetch in seconds ({MINIMUM_FETCH_TIMEOUT}-{MAXIMUM_FETCH_TIMEOUT})\n"
    );

    fs::write(path, content)
        .with_context(|| format!("failed to write default config to {}", path.display()))?;

    log_block_start!("Created default configuration at {}", path.display());
    Ok(())
}
