use std::sync::Arc;

use clap::ArgMatches;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use board_client::{
    ChannelReloader, HttpTransport, PollExit, ReloadNotice, StalenessPoller, spawn_poller,
};
use board_protocol::{PollTarget, Timestamp, Url};

use super::helpers::{apply_global_overrides, report_error, runtime};
use super::load_config_with_warning;
use crate::color;

pub(crate) fn handle_watch_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = matches
        .get_one::<String>("page")
        .ok_or("Page argument is required")?;
    let since_raw = matches
        .get_one::<String>("since")
        .ok_or("--since is required")?;
    let open_page = matches.get_flag("open");

    let since = since_raw.parse::<Timestamp>().inspect_err(|e| {
        eprintln!("{} {}", color::error("Invalid --since:"), e);
    })?;

    let mut config = load_config_with_warning();
    if let Some(interval_ms) = matches.get_one::<u64>("interval-ms") {
        config.poll.interval_ms = Some(*interval_ms);
    }
    let config = apply_global_overrides(config, matches)?;

    let base_url = config.server.base_url().inspect_err(|e| {
        eprintln!("{} {}", color::error("Error:"), e);
    })?;
    let target = PollTarget::for_page(&base_url, page, since)
        .inspect_err(|e| report_error("Invalid page path:", e))?;
    let page_url = base_url
        .join(page)
        .inspect_err(|e| report_error("Invalid page path:", e))?;

    info!(
        event = "cli.watch_started",
        url = %target.endpoint_url(),
        since = %since,
    );
    let cadence = format!(
        "(every {} ms, Ctrl-C to stop)",
        config.poll.interval().as_millis()
    );
    println!(
        "Watching {} for content newer than {} {}",
        color::accent(page_url.as_str()),
        color::accent(&since.to_string()),
        color::muted(&cadence),
    );

    let transport = HttpTransport::from_config(&config.server)
        .inspect_err(|e| report_error("Could not create HTTP client:", e))?;
    let transport = Arc::new(transport);
    let (reloader, mut notices) = ChannelReloader::new();
    let poller = StalenessPoller::new(target, transport, Arc::new(reloader))
        .with_interval(config.poll.interval());

    let summary = runtime()?.block_on(async move {
        let handle = spawn_poller(poller);
        tokio::spawn(wait_for_shutdown_signal(handle.token()));
        handle.join().await
    });

    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{} {}", color::error("Watch failed:"), e);
            error!(event = "cli.watch_failed", error = %e);
            return Err(e.into());
        }
    };

    match summary.exit {
        PollExit::Reloaded { observed } => {
            println!(
                "{} {}",
                color::success("New content:"),
                color::accent(&observed.to_string())
            );
            if open_page {
                let reload_url = cache_busting_url(&page_url, observed);
                if let Err(e) = open::that(reload_url.as_str()) {
                    eprintln!(
                        "{} could not open {}: {}",
                        color::warning("Warning:"),
                        reload_url,
                        e
                    );
                    warn!(event = "cli.watch_open_failed", url = %reload_url, error = %e);
                }
            }
            if let Ok(notice) = notices.try_recv() {
                log_notice(&notice, summary.cycles);
            }
        }
        PollExit::Cancelled => {
            println!("{}", color::muted("Stopped."));
            info!(event = "cli.watch_cancelled", cycles = summary.cycles);
        }
    }

    Ok(())
}

fn log_notice(notice: &ReloadNotice, cycles: u64) {
    info!(
        event = "cli.watch_completed",
        url = %notice.endpoint_url,
        known_ts = %notice.known_timestamp,
        observed_ts = %notice.observed_timestamp,
        cycles,
    );
}

/// Page URL with a throwaway query pair so caches cannot serve the old copy.
fn cache_busting_url(page_url: &Url, observed: Timestamp) -> Url {
    let mut url = page_url.clone();
    url.query_pairs_mut()
        .append_pair("_", &observed.as_secs().to_string());
    url
}

/// Cancel `token` on SIGTERM or SIGINT/Ctrl-C.
async fn wait_for_shutdown_signal(token: CancellationToken) {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                warn!(event = "cli.watch_sigterm_unavailable", error = %e);
                if ctrl_c.await.is_ok() {
                    token.cancel();
                }
                return;
            }
        };

        tokio::select! {
            _ = ctrl_c => {
                info!(event = "cli.watch_signal_received", signal = "SIGINT");
            }
            _ = sigterm.recv() => {
                info!(event = "cli.watch_signal_received", signal = "SIGTERM");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if ctrl_c.await.is_err() {
            return;
        }
        info!(event = "cli.watch_signal_received", signal = "SIGINT");
    }

    token.cancel();
}
