use clap::ArgMatches;
use tracing::{error, warn};

use board_config::BoardConfig;

use crate::color;

mod helpers;
mod star;
mod watch;

use star::handle_star_command;
use watch::handle_watch_command;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("watch", sub_matches)) => handle_watch_command(sub_matches),
        Some(("star", sub_matches)) => handle_star_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_with_warning() -> BoardConfig {
    match BoardConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "{} Could not load config: {}. Using defaults.",
                color::warning("Warning:"),
                e
            );
            eprintln!(
                "  {}",
                color::hint("Check ~/.board/config.toml and ./.board/config.toml for syntax errors.")
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                error_code = e.error_code(),
                "Config load failed, using defaults"
            );
            BoardConfig::default()
        }
    }
}
