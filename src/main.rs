//! CLI entry point: parse arguments and dispatch to the application
//! coordinator or a one-shot command.

use anyhow::Result;

use momentr::Momentr;
use momentr::args::{self, CliAction, ParsedArgs};
use momentr::commands;
use momentr::config;

fn main() -> Result<()> {
    let parsed_args = ParsedArgs::from_env();

    match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp | CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(())
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
        } => {
            config::set_config_dir(config_dir)?;
            Momentr::new(debug_enabled).run()
        }
        CliAction::Check {
            debug_enabled,
            config_dir,
        } => {
            config::set_config_dir(config_dir)?;
            commands::check::handle_check_command(debug_enabled)
        }
    }
}
