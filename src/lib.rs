//! # momentr
//!
//! Internal library for the momentr binary.
//!
//! momentr watches the daily BeReal moment for a single region: it polls the
//! public "last moment" endpoint, validates the announced window, and
//! classifies the current instant as waiting, now, or past. One immutable
//! [`Snapshot`] is produced per poll tick; every failure degrades to an
//! explicit error snapshot instead of silently stale data.
//!
//! ## Architecture
//!
//! - **Entry Point**: [`Momentr`] coordinates startup, signals, and shutdown
//! - **Fetcher**: `fetch` issues one GET per tick and parses the payload
//! - **Classifier**: `moment` holds the pure window and state logic
//! - **Orchestration**: `tick` composes fetch outcomes into snapshots
//! - **Loop**: internal `core` module drives ticks on an adaptive interval
//! - **Infrastructure**: configuration, signal handling, logging, and an
//!   injectable clock for deterministic tests

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod fetch;
pub mod moment;
pub mod signals;
pub mod snapshot;
pub mod tick;
pub mod time_source;

// Internal modules
mod core;
mod momentr;

pub use moment::{MomentState, MomentWindow, classify};
pub use momentr::Momentr;
pub use snapshot::Snapshot;
