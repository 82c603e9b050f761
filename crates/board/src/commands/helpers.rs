use std::fmt::Display;

use clap::ArgMatches;
use tracing::error;

use board_config::BoardConfig;

use crate::color;

/// Apply flags shared by every command on top of the loaded config, then re-validate.
pub(crate) fn apply_global_overrides(
    mut config: BoardConfig,
    matches: &ArgMatches,
) -> Result<BoardConfig, Box<dyn std::error::Error>> {
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.server.base_url = Some(base_url.clone());
    }

    if let Err(e) = config.validate() {
        eprintln!("{} {}", color::error("Invalid configuration:"), e);
        error!(event = "cli.config.invalid", error = %e);
        return Err(e.into());
    }

    Ok(config)
}

/// Multi-threaded runtime for a single command invocation.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()
        .inspect_err(|e| report_error("Could not start async runtime:", e))?;
    Ok(runtime)
}

/// One-line user-facing message for a failed step.
pub(crate) fn error_line(label: &str, err: &dyn Display) -> String {
    format!("{} {}", color::error(label), err)
}

/// Print `err` to stderr and log it. `main` exits silently, so every
/// early return must go through here or an equivalent `eprintln!`.
pub(crate) fn report_error<E: Display>(label: &str, err: &E) {
    eprintln!("{}", error_line(label, err));
    error!(event = "cli.command_failed", label, error = %err);
}
