//! Staleness polling.
//!
//! A poller asks the page's auto-update endpoint for the newest content
//! timestamp. If it is newer than the timestamp the page was rendered with,
//! the reloader fires and the loop ends. Otherwise the poller waits a fixed
//! interval and asks again. Failed cycles are logged and rescheduled the same
//! way, so a transient outage never stops the loop.
//!
//! The baseline is fixed at construction. Each cycle compares against the
//! load-time timestamp, not the most recent server value.

mod handle;
mod types;

use std::sync::Arc;
use std::time::Duration;

use board_protocol::PollTarget;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::reload::{ReloadNotice, Reloader};
use crate::transport::Transport;

pub use handle::{PollerHandle, spawn_poller};
pub use types::{PollCycle, PollExit, PollSummary};
use types::PollCounters;

/// Delay between the end of one cycle and the start of the next.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10_000);

pub struct StalenessPoller {
    target: PollTarget,
    transport: Arc<dyn Transport>,
    reloader: Arc<dyn Reloader>,
    interval: Duration,
}

impl StalenessPoller {
    pub fn new(
        target: PollTarget,
        transport: Arc<dyn Transport>,
        reloader: Arc<dyn Reloader>,
    ) -> Self {
        Self {
            target,
            transport,
            reloader,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the delay between cycles. Constant for the poller's lifetime.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn target(&self) -> &PollTarget {
        &self.target
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single cycle: one request, one comparison. No side effects.
    pub async fn poll_once(&self) -> PollCycle {
        match self
            .transport
            .fetch_timestamp(self.target.endpoint_url())
            .await
        {
            Ok(observed) if self.target.is_stale(observed) => PollCycle::Stale { observed },
            Ok(observed) => PollCycle::Fresh { observed },
            Err(e) => PollCycle::Failed(e),
        }
    }

    /// Poll until the content goes stale or `shutdown` is cancelled.
    ///
    /// Cycles never overlap: the next request starts only after the previous
    /// reply has been handled and the interval has elapsed.
    pub async fn run(self, shutdown: CancellationToken) -> PollSummary {
        let mut counters = PollCounters::default();

        info!(
            event = "client.poll.started",
            url = %self.target.endpoint_url(),
            known_ts = %self.target.known_timestamp(),
            interval_ms = self.interval.as_millis() as u64,
        );

        loop {
            let cycle = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                cycle = self.poll_once() => cycle,
            };
            counters.record_cycle();

            match cycle {
                PollCycle::Stale { observed } => {
                    info!(
                        event = "client.poll.reload_triggered",
                        url = %self.target.endpoint_url(),
                        known_ts = %self.target.known_timestamp(),
                        observed_ts = %observed,
                        cycles = counters.cycles,
                    );
                    self.reloader.reload(&ReloadNotice {
                        endpoint_url: self.target.endpoint_url().clone(),
                        known_timestamp: self.target.known_timestamp(),
                        observed_timestamp: observed,
                    });
                    return counters.finish(PollExit::Reloaded { observed });
                }
                PollCycle::Fresh { observed } => {
                    debug!(
                        event = "client.poll.cycle_completed",
                        observed_ts = %observed,
                        cycle = counters.cycles,
                    );
                }
                PollCycle::Failed(e) => {
                    counters.record_failure();
                    warn!(
                        event = "client.poll.cycle_failed",
                        url = %self.target.endpoint_url(),
                        error = %e,
                        error_code = e.error_code(),
                        transient = e.is_transient(),
                        cycle = counters.cycles,
                    );
                }
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(
            event = "client.poll.cancelled",
            url = %self.target.endpoint_url(),
            cycles = counters.cycles,
            failures = counters.failures,
        );
        counters.finish(PollExit::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingReloader, ScriptedTransport, base_url};
    use board_protocol::Timestamp;

    fn target(known: i64) -> PollTarget {
        PollTarget::for_page(&base_url(), "/messList", Timestamp::from_secs(known)).unwrap()
    }

    fn poller(
        known: i64,
        transport: &Arc<ScriptedTransport>,
        reloader: &Arc<RecordingReloader>,
    ) -> StalenessPoller {
        StalenessPoller::new(target(known), transport.clone(), reloader.clone())
    }

    fn gaps(transport: &ScriptedTransport) -> Vec<Duration> {
        transport
            .poll_instants()
            .windows(2)
            .map(|w| w[1] - w[0])
            .collect()
    }

    fn assert_interval(gap: Duration, expected: Duration) {
        assert!(
            gap >= expected && gap < expected + Duration::from_millis(5),
            "expected a gap of {expected:?}, got {gap:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_fresh_then_stale_reloads_on_fourth() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ScriptedTransport::fresh(100),
            ScriptedTransport::fresh(100),
            ScriptedTransport::fresh(100),
            ScriptedTransport::fresh(101),
        ]));
        let reloader = Arc::new(RecordingReloader::default());

        let summary = poller(100, &transport, &reloader)
            .run(CancellationToken::new())
            .await;

        assert_eq!(summary.cycles, 4);
        assert_eq!(summary.failures, 0);
        assert_eq!(
            summary.exit,
            PollExit::Reloaded {
                observed: Timestamp::from_secs(101)
            }
        );
        assert_eq!(reloader.count(), 1);

        let gaps = gaps(&transport);
        assert_eq!(gaps.len(), 3);
        for gap in gaps {
            assert_interval(gap, Duration::from_secs(10));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_poll_after_reload() {
        let transport = Arc::new(
            ScriptedTransport::new(vec![ScriptedTransport::fresh(5)]).with_fallback(5),
        );
        let reloader = Arc::new(RecordingReloader::default());

        let summary = poller(1, &transport, &reloader)
            .run(CancellationToken::new())
            .await;
        assert_eq!(summary.cycles, 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(transport.poll_instants().len(), 1);
        assert_eq!(reloader.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_baseline_does_not_ratchet() {
        // A running-maximum comparison would reload on the second reply.
        let transport = Arc::new(ScriptedTransport::new(vec![
            ScriptedTransport::fresh(50),
            ScriptedTransport::fresh(100),
            ScriptedTransport::fresh(100),
            ScriptedTransport::fresh(101),
        ]));
        let reloader = Arc::new(RecordingReloader::default());

        let summary = poller(100, &transport, &reloader)
            .run(CancellationToken::new())
            .await;

        assert_eq!(summary.cycles, 4);
        let notices = reloader.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].known_timestamp, Timestamp::from_secs(100));
        assert_eq!(notices[0].observed_timestamp, Timestamp::from_secs(101));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_reschedules_after_interval() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ScriptedTransport::outage(),
            ScriptedTransport::outage(),
            ScriptedTransport::fresh(100),
            ScriptedTransport::fresh(200),
        ]));
        let reloader = Arc::new(RecordingReloader::default());

        let summary = poller(100, &transport, &reloader)
            .run(CancellationToken::new())
            .await;

        assert_eq!(summary.cycles, 4);
        assert_eq!(summary.failures, 2);
        assert_eq!(reloader.count(), 1);
        for gap in gaps(&transport) {
            assert_interval(gap, Duration::from_secs(10));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_interval_is_constant() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ScriptedTransport::fresh(1),
            ScriptedTransport::fresh(1),
            ScriptedTransport::fresh(1),
            ScriptedTransport::fresh(1),
            ScriptedTransport::fresh(2),
        ]));
        let reloader = Arc::new(RecordingReloader::default());

        poller(1, &transport, &reloader)
            .with_interval(Duration::from_millis(250))
            .run(CancellationToken::new())
            .await;

        let gaps = gaps(&transport);
        assert_eq!(gaps.len(), 4);
        for gap in gaps {
            assert_interval(gap, Duration::from_millis(250));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_while_waiting() {
        let transport = Arc::new(ScriptedTransport::new(Vec::new()).with_fallback(100));
        let reloader = Arc::new(RecordingReloader::default());

        let handle = spawn_poller(poller(100, &transport, &reloader));
        tokio::time::sleep(Duration::from_secs(25)).await;
        handle.stop();

        let summary = handle.join().await.unwrap();
        assert_eq!(summary.exit, PollExit::Cancelled);
        assert_eq!(summary.cycles, 3);
        assert_eq!(reloader.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_start_makes_no_request() {
        let transport = Arc::new(ScriptedTransport::new(Vec::new()).with_fallback(100));
        let reloader = Arc::new(RecordingReloader::default());
        let token = CancellationToken::new();
        token.cancel();

        let summary = poller(100, &transport, &reloader).run(token).await;
        assert_eq!(summary.exit, PollExit::Cancelled);
        assert_eq!(summary.cycles, 0);
        assert!(transport.poll_instants().is_empty());
    }

    #[tokio::test]
    async fn test_poll_once_classifies_reply() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ScriptedTransport::fresh(100),
            ScriptedTransport::fresh(101),
            ScriptedTransport::outage(),
        ]));
        let reloader = Arc::new(RecordingReloader::default());
        let poller = poller(100, &transport, &reloader);

        assert!(matches!(poller.poll_once().await, PollCycle::Fresh { .. }));
        assert!(poller.poll_once().await.is_stale());
        assert!(matches!(poller.poll_once().await, PollCycle::Failed(_)));
        // poll_once never reloads on its own
        assert_eq!(reloader.count(), 0);
        assert_eq!(poller.target().known_timestamp(), Timestamp::from_secs(100));
    }

    #[tokio::test]
    async fn test_polls_the_target_endpoint() {
        let transport = Arc::new(ScriptedTransport::new(vec![ScriptedTransport::fresh(2)]));
        let reloader = Arc::new(RecordingReloader::default());

        poller(1, &transport, &reloader)
            .run(CancellationToken::new())
            .await;

        let log = transport.poll_log.lock().unwrap();
        assert_eq!(log[0].0.as_str(), "http://localhost:5000/au/messList");
    }
}
