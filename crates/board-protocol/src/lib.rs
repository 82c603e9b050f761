//! # board-protocol
//!
//! Wire types shared by the board client and its hosts.
//!
//! Pure data: timestamps, poll targets, action requests and the URL
//! derivation rules for the two server endpoints. No I/O happens here.

mod endpoints;
mod errors;
mod types;

pub use endpoints::{
    ActionRequest, AUTO_UPDATE_PREFIX, DEFAULT_STAR_PREFIX, PollTarget, ServerTimestampResponse,
};
pub use errors::ProtocolError;
pub use types::Timestamp;

pub use url::Url;
