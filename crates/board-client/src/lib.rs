//! board-client: staleness polling and action dispatch for a board server.
//!
//! Two independent pieces share nothing but the transport:
//!
//! - [`poller`] - watch a page's auto-update endpoint and fire a reload once
//!   the server reports content newer than the page was rendered with
//! - [`dispatch`] - submit star actions, one request per call
//!
//! Network access goes through the [`transport::Transport`] trait so hosts
//! and tests can substitute their own.

pub mod dispatch;
pub mod errors;
pub mod logging;
pub mod poller;
pub mod reload;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatch::{ActionDispatcher, ActionReceipt, DispatchHandle};
pub use errors::ClientError;
pub use logging::init_logging;
pub use poller::{
    DEFAULT_POLL_INTERVAL, PollCycle, PollExit, PollSummary, PollerHandle, StalenessPoller,
    spawn_poller,
};
pub use reload::{ChannelReloader, ReloadNotice, Reloader};
pub use transport::{HttpTransport, Transport};

pub use board_protocol::{ActionRequest, PollTarget, Timestamp, Url};
