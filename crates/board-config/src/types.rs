//! Configuration types for the board client.
//!
//! Every field is optional so that a later file in the hierarchy only
//! overrides what it sets. Accessors resolve defaults.

use std::time::Duration;

use board_protocol::Url;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::errors::ConfigError;

/// Top-level configuration, one table per concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub star: StarConfig,
}

/// Which server to talk to, and how.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Scheme, host and port of the board server, e.g. `http://localhost:5000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout. Unset leaves the HTTP client's default in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Parsed base URL. Errors if unset or malformed.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.base_url.as_deref().ok_or(ConfigError::MissingBaseUrl)?;
        Url::parse(raw).map_err(|e| ConfigError::InvalidConfiguration {
            message: format!("Invalid server.base_url '{}': {}", raw, e),
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            base_url: override_config
                .base_url
                .clone()
                .or_else(|| base.base_url.clone()),
            request_timeout_secs: override_config
                .request_timeout_secs
                .or(base.request_timeout_secs),
        }
    }
}

/// Staleness polling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay between poll cycles in milliseconds.
    /// Default: 10000.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(
            self.interval_ms
                .unwrap_or(defaults::DEFAULT_POLL_INTERVAL_MS),
        )
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            interval_ms: override_config.interval_ms.or(base.interval_ms),
        }
    }
}

/// Star action endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StarConfig {
    /// Path the subject id is appended to.
    /// Default: `/x/star/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
}

impl StarConfig {
    pub fn path_prefix(&self) -> &str {
        self.path_prefix
            .as_deref()
            .unwrap_or(defaults::DEFAULT_STAR_PREFIX)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            path_prefix: override_config
                .path_prefix
                .clone()
                .or_else(|| base.path_prefix.clone()),
        }
    }
}
