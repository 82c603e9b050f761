//! The terminal side effect of the poller.

use board_protocol::{Timestamp, Url};
use tokio::sync::mpsc;

/// What the poller saw when it decided the page is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadNotice {
    pub endpoint_url: Url,
    pub known_timestamp: Timestamp,
    pub observed_timestamp: Timestamp,
}

/// Performs a full, cache-bypassing reload of whatever the poller watches.
///
/// Called at most once per poller; the loop ends right after.
pub trait Reloader: Send + Sync {
    fn reload(&self, notice: &ReloadNotice);
}

/// Forwards the notice to a host event loop.
#[derive(Debug, Clone)]
pub struct ChannelReloader {
    tx: mpsc::UnboundedSender<ReloadNotice>,
}

impl ChannelReloader {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ReloadNotice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Reloader for ChannelReloader {
    fn reload(&self, notice: &ReloadNotice) {
        if self.tx.send(notice.clone()).is_err() {
            tracing::warn!(
                event = "client.reload.receiver_dropped",
                url = %notice.endpoint_url,
            );
        }
    }
}
