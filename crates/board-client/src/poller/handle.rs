use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::StalenessPoller;
use super::types::PollSummary;
use crate::errors::ClientError;

/// A poll loop running on the tokio runtime.
///
/// Dropping the handle does not stop the loop; call [`PollerHandle::stop`].
pub struct PollerHandle {
    shutdown: CancellationToken,
    task: JoinHandle<PollSummary>,
}

impl PollerHandle {
    /// Ask the loop to stop. Takes effect at the next await point.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    /// Token that stops this loop when cancelled.
    pub fn token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop to end.
    pub async fn join(self) -> Result<PollSummary, ClientError> {
        self.task
            .await
            .map_err(|e| ClientError::TaskAborted(e.to_string()))
    }
}

/// Spawn `poller` onto the current tokio runtime.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn spawn_poller(poller: StalenessPoller) -> PollerHandle {
    let shutdown = CancellationToken::new();
    let task = tokio::spawn(poller.run(shutdown.clone()));
    PollerHandle { shutdown, task }
}
