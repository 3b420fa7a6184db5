//! Application coordinator that manages the complete lifecycle of momentr.
//!
//! This module handles resource acquisition, initialization, and orchestration
//! of the core polling loop: logging headers, signal handler setup,
//! configuration loading, and graceful shutdown.

use anyhow::Result;

use crate::config::Config;
use crate::core::run_loop;
use crate::signals::setup_signal_handler;

/// Builder for configuring and running the momentr application.
///
/// # Examples
///
/// ```no_run
/// use momentr::Momentr;
///
/// # fn main() -> anyhow::Result<()> {
/// // Normal application startup
/// let debug_enabled = false;
/// Momentr::new(debug_enabled).run()?;
///
/// // Embedded startup without the version header
/// Momentr::new(debug_enabled).without_headers().run()?;
/// # Ok(())
/// # }
/// ```
pub struct Momentr {
    debug_enabled: bool,
    show_headers: bool,
}

impl Momentr {
    /// Create a runner with defaults matching a normal run.
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            show_headers: true,
        }
    }

    /// Skip the version header display.
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    /// Execute the application: load configuration, install the signal
    /// handler, run the poll loop, and shut down cleanly.
    pub fn run(self) -> Result<()> {
        if self.show_headers {
            log_version!();

            if self.debug_enabled {
                log_pipe!();
                log_debug!("Debug mode enabled - showing per-tick details");
            }
        }

        let signal_state = setup_signal_handler(self.debug_enabled)?;

        let config = Config::load()?;
        config.log_config();

        run_loop(&config, &signal_state, self.debug_enabled)?;

        log_block_start!("Shutting down momentr...");
        log_end!();

        Ok(())
    }
}
