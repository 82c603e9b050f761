use board_protocol::Timestamp;

use crate::errors::ClientError;

/// Result of one staleness poll cycle.
#[derive(Debug)]
pub enum PollCycle {
    /// Server content is newer than the baseline. Reload.
    Stale { observed: Timestamp },
    /// Nothing newer yet. Poll again after the interval.
    Fresh { observed: Timestamp },
    /// The request failed or the reply was unusable. Poll again after the interval.
    Failed(ClientError),
}

impl PollCycle {
    pub fn is_stale(&self) -> bool {
        matches!(self, PollCycle::Stale { .. })
    }
}

/// Why a poll loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollExit {
    /// The reloader was invoked with this server timestamp.
    Reloaded { observed: Timestamp },
    /// The cancellation token fired first.
    Cancelled,
}

/// Counters reported when a poll loop ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSummary {
    /// Completed cycles, failed ones included.
    pub cycles: u64,
    pub failures: u64,
    pub exit: PollExit,
}

/// Running counters for a poll loop. Saturates instead of wrapping.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PollCounters {
    pub(crate) cycles: u64,
    pub(crate) failures: u64,
}

impl PollCounters {
    pub(crate) fn record_cycle(&mut self) {
        self.cycles = self.cycles.saturating_add(1);
    }

    pub(crate) fn record_failure(&mut self) {
        self.failures = self.failures.saturating_add(1);
    }

    pub(crate) fn finish(self, exit: PollExit) -> PollSummary {
        PollSummary {
            cycles: self.cycles,
            failures: self.failures,
            exit,
        }
    }
}
