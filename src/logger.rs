//! Structured logging system with visual formatting.
//!
//! This module provides a logging system designed for momentr's visual output
//! style. It includes different log levels and special formatting macros for
//! creating structured output with Unicode box drawing characters.
//!
//! The logger supports runtime enable/disable functionality so that commands
//! emitting machine-readable output (the `check` command prints a JSON
//! snapshot) are not corrupted by decorative lines.
//!
//! ## Logging Conventions
//!
//! - **`log_block_start!`**: initiates a new conceptual block of log
//!   information (state changes, startup phases, shutdown). Prepends an empty
//!   pipe `┃` for spacing, then prints `┣ message`. Follow-up lines within the
//!   block use `log_decorated!` or `log_indented!`.
//! - **`log_decorated!`**: prints `┣ message`; continuation of a block or a
//!   simple standalone status line.
//! - **`log_indented!`**: prints `┃   message`; nested details belonging to a
//!   parent message (configuration items, window fields).
//! - **`log_pipe!`**: inserts a single empty `┃` line; used to create visual
//!   separation before `log_warning!`, `log_error!`, or `log_debug!` when they
//!   begin a block of their own. Not for use at the end of a block.
//! - **`log_version!`**: prints the application startup header, once.
//! - **`log_end!`**: prints the final termination marker `╹`, once.
//! - **`log_warning!`, `log_error!`, `log_debug!`**: semantic level macros
//!   with a colored `[LEVEL]` prefix inside the pipe structure.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

// Use an AtomicBool instead of thread_local for thread safety
static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Main logging interface providing structured output formatting.
pub struct Log;

impl Log {
    /// Enable or disable logging temporarily.
    ///
    /// This is useful for quiet operation when log output would interfere
    /// with machine-readable results.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Get the timestamp prefix for simulated-clock runs.
    ///
    /// Returns `[HH:MM:SS] ` of the simulated UTC time, or an empty string
    /// when running against the real clock. Public for macro access.
    pub fn get_timestamp_prefix() -> String {
        // Only add timestamps under a simulated clock; check without
        // initializing the time source
        if crate::time_source::is_initialized() && crate::time_source::is_simulated() {
            format!("[{}] ", crate::time_source::now_utc().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Route formatted output to stdout (needed by macros).
pub fn write_output(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

// # Logging Macros

/// Log a decorated message, typically as part of an existing block or for standalone emphasis.
#[macro_export]
macro_rules! log_decorated {
    // Format string literal (with or without args) - always pass through format!
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let message = format!($fmt $($arg)*);
            let formatted = format!("{prefix}┣ {message}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
    // Non-literal expression - convert to string
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let expr = $expr;
            let formatted = format!("{prefix}┣ {expr}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
}

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let message = format!($fmt $($arg)*);
            let formatted = format!("{prefix}┃   {message}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let expr = $expr;
            let formatted = format!("{prefix}┃   {expr}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let formatted = format!("{prefix}┃\n");
            $crate::logger::write_output(&formatted);
        }
    }};
}

/// Log a block start message, initiating a new conceptual block of information.
#[macro_export]
macro_rules! log_block_start {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let message = format!($fmt $($arg)*);
            let formatted = format!("{prefix}┃\n{prefix}┣ {message}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let expr = $expr;
            let formatted = format!("{prefix}┃\n{prefix}┣ {expr}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let version = env!("CARGO_PKG_VERSION");
            let formatted = format!("{prefix}┏ momentr v{version} ━━╸\n");
            $crate::logger::write_output(&formatted);
        }
    }};
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let formatted = format!("{prefix}╹\n");
            $crate::logger::write_output(&formatted);
        }
    }};
}

/// Log a warning message with pipe prefix and yellow-colored text.
#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let message = format!($fmt $($arg)*);
            let formatted = format!("{prefix}┣[\x1b[33mWARNING\x1b[0m] {message}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let expr = $expr;
            let formatted = format!("{prefix}┣[\x1b[33mWARNING\x1b[0m] {expr}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
}

/// Log an error message with pipe prefix and red-colored text.
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let message = format!($fmt $($arg)*);
            let formatted = format!("{prefix}┣[\x1b[31mERROR\x1b[0m] {message}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let expr = $expr;
            let formatted = format!("{prefix}┣[\x1b[31mERROR\x1b[0m] {expr}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
}

/// Log a debug/operational message with pipe prefix and green-colored text.
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let message = format!($fmt $($arg)*);
            let formatted = format!("{prefix}┣[\x1b[32mDEBUG\x1b[0m] {message}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let expr = $expr;
            let formatted = format!("{prefix}┣[\x1b[32mDEBUG\x1b[0m] {expr}\n");
            $crate::logger::write_output(&formatted);
        }
    }};
}
