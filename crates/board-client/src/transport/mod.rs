//! Network seam for the poller and dispatcher.

mod http;

use async_trait::async_trait;
use board_protocol::{Timestamp, Url};

use crate::errors::ClientError;

pub use http::HttpTransport;

/// The two requests the client ever makes.
///
/// Implementations must not retry; policy belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET url`, expecting `{"ts": ...}`.
    async fn fetch_timestamp(&self, url: &Url) -> Result<Timestamp, ClientError>;

    /// `POST url` with an empty body. Returns the decoded JSON reply,
    /// `Value::Null` when the body is empty.
    async fn post_action(&self, url: &Url) -> Result<serde_json::Value, ClientError>;
}
