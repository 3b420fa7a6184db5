//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. The surface is small (one
//! optional subcommand and three flags), so parsing is hand-rolled and
//! unknown options fall back to help output.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the polling loop with these settings
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Run one tick and print the snapshot as JSON
    Check {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse the process arguments.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }

    /// Parse command-line arguments into a structured result.
    ///
    /// Help and version flags take precedence anywhere on the line; the first
    /// non-flag argument is the subcommand.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut config_dir: Option<String> = None;
        let mut command: Option<String> = None;
        let mut unknown_arg_found = false;

        let mut idx = 0;
        while idx < args_vec.len() {
            let arg = &args_vec[idx];
            match arg.as_str() {
                "--help" | "-h" => {
                    return ParsedArgs {
                        action: CliAction::ShowHelp,
                    };
                }
                "--version" | "-V" | "-v" => {
                    return ParsedArgs {
                        action: CliAction::ShowVersion,
                    };
                }
                "--debug" | "-d" => debug_enabled = true,
                "--config" | "-c" => {
                    idx += 1;
                    match args_vec.get(idx) {
                        Some(dir) => config_dir = Some(dir.clone()),
                        None => unknown_arg_found = true,
                    }
                }
                other if !other.starts_with('-') && command.is_none() => {
                    command = Some(other.to_string());
                }
                _ => unknown_arg_found = true,
            }
            idx += 1;
        }

        if unknown_arg_found {
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        let action = match command.as_deref() {
            None | Some("run") => CliAction::Run {
                debug_enabled,
                config_dir,
            },
            Some("check") => CliAction::Check {
                debug_enabled,
                config_dir,
            },
            Some(_) => CliAction::ShowHelpDueToError,
        };

        ParsedArgs { action }
    }
}

/// Display version information in the log header style.
pub fn display_version_info() {
    log_version!();
    log_block_start!("Tracks the daily moment window for a region");
    log_indented!("Endpoint: {}/<region>", crate::constants::ENDPOINT_BASE);
    log_end!();
}

/// Display help information.
pub fn display_help() {
    println!("momentr v{}", env!("CARGO_PKG_VERSION"));
    println!("Polls the BeReal moment endpoint and classifies the current time");
    println!("against the announced window.");
    println!();
    println!("Usage: momentr [COMMAND] [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  run                 Start the polling loop (default)");
    println!("  check               Run one tick and print the snapshot as JSON");
    println!();
    println!("Options:");
    println!("  -c, --config <DIR>  Use an alternate configuration directory");
    println!("  -d, --debug         Enable detailed debug output");
    println!("  -h, --help          Print help");
    println!("  -V, --version       Print version");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_runs_the_loop() {
        let parsed = ParsedArgs::parse(["momentr"]);
        assert_eq!(
            parsed.action,
            CliAction::Run {
                debug_enabled: false,
                config_dir: None,
            }
        );
    }

    #[test]
    fn explicit_run_with_flags() {
        let parsed = ParsedArgs::parse(["momentr", "run", "--debug", "--config", "/tmp/conf"]);
        assert_eq!(
            parsed.action,
            CliAction::Run {
                debug_enabled: true,
                config_dir: Some("/tmp/conf".to_string()),
            }
        );
    }

    #[test]
    fn check_subcommand() {
        let parsed = ParsedArgs::parse(["momentr", "check", "-d"]);
        assert_eq!(
            parsed.action,
            CliAction::Check {
                debug_enabled: true,
                config_dir: None,
            }
        );
    }

    #[test]
    fn help_takes_precedence() {
        let parsed = ParsedArgs::parse(["momentr", "check", "--help"]);
        assert_eq!(parsed.action, CliAction::ShowHelp);
    }

    #[test]
    fn version_flag() {
        let parsed = ParsedArgs::parse(["momentr", "-V"]);
        assert_eq!(parsed.action, CliAction::ShowVersion);
    }

    #[test]
    fn unknown_flag_falls_back_to_help() {
        let parsed = ParsedArgs::parse(["momentr", "--frobnicate"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn unknown_subcommand_falls_back_to_help() {
        let parsed = ParsedArgs::parse(["momentr", "watch"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn config_flag_requires_a_value() {
        let parsed = ParsedArgs::parse(["momentr", "--config"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }
}
