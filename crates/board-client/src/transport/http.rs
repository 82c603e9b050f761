use std::time::Duration;

use async_trait::async_trait;
use board_config::ServerConfig;
use board_protocol::{ServerTimestampResponse, Timestamp, Url};
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use super::Transport;
use crate::errors::ClientError;

/// reqwest-backed transport.
///
/// No timeout unless one is configured; reqwest's default then applies.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ClientError> {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::ClientInit(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, ClientError> {
        Self::with_timeout(config.request_timeout())
    }

    /// Send, check status, and read the full body.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<Vec<u8>, ClientError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| request_error(url, e))?;
        debug!(
            event = "client.http.response_received",
            url = %url,
            status = status.as_u16(),
            bytes = body.len(),
        );
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_timestamp(&self, url: &Url) -> Result<Timestamp, ClientError> {
        let body = self.execute(self.client.get(url.clone()), url).await?;
        let decoded: ServerTimestampResponse =
            serde_json::from_slice(&body).map_err(|e| ClientError::MalformedResponse {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(decoded.ts)
    }

    async fn post_action(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        let body = self.execute(self.client.post(url.clone()), url).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| ClientError::MalformedResponse {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn request_error(url: &Url, error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout {
            url: url.to_string(),
        }
    } else {
        ClientError::Transport {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
