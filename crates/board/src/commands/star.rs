use std::sync::Arc;

use clap::ArgMatches;
use tracing::{error, info};

use board_client::{ActionDispatcher, HttpTransport};

use super::helpers::{apply_global_overrides, report_error, runtime};
use super::load_config_with_warning;
use crate::color;

pub(crate) fn handle_star_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let subjects: Vec<String> = matches
        .get_many::<String>("subject")
        .ok_or("At least one message id is required")?
        .cloned()
        .collect();

    let config = apply_global_overrides(load_config_with_warning(), matches)?;
    let base_url = config.server.base_url().inspect_err(|e| {
        eprintln!("{} {}", color::error("Error:"), e);
    })?;

    let transport = HttpTransport::from_config(&config.server)
        .inspect_err(|e| report_error("Could not create HTTP client:", e))?;
    let transport = Arc::new(transport);
    let dispatcher =
        ActionDispatcher::new(transport, base_url).with_prefix(config.star.path_prefix());

    info!(event = "cli.star_started", count = subjects.len());

    // Every id goes out before any reply is awaited.
    let results = runtime()?.block_on(async move {
        let handles: Vec<_> = subjects
            .iter()
            .map(|subject| dispatcher.dispatch_star(subject))
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let subject = handle.subject_id().to_string();
            results.push((subject, handle.wait().await));
        }
        results
    });

    let mut failed = 0usize;
    for (subject, result) in &results {
        match result {
            Ok(receipt) => {
                println!(
                    "{} {} {}",
                    color::success("Starred"),
                    color::accent(subject),
                    color::muted(&format!("({})", receipt.request.endpoint_url().path())),
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} '{}': {}", color::error("Could not star"), subject, e);
                error!(
                    event = "cli.star_failed",
                    subject_id = subject.as_str(),
                    error = %e,
                    error_code = e.error_code(),
                );
            }
        }
    }

    info!(
        event = "cli.star_completed",
        succeeded = results.len() - failed,
        failed = failed,
    );

    if failed > 0 {
        return Err(format!("{} of {} star request(s) failed", failed, results.len()).into());
    }
    Ok(())
}
