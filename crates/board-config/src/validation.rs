//! Configuration validation logic.

use crate::errors::ConfigError;
use crate::types::BoardConfig;

/// Validate a BoardConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `server.base_url`, if set, must parse and use `http` or `https`
/// - `server.request_timeout_secs`, if set, must be > 0
/// - `poll.interval_ms`, if set, must be > 0
/// - `star.path_prefix`, if set, must start and end with `/`
///
/// A missing base URL is not a validation error; commands that need the
/// server report it when they resolve the URL.
pub fn validate_config(config: &BoardConfig) -> Result<(), ConfigError> {
    if config.server.base_url.is_some() {
        let url = config.server.base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidConfiguration {
                message: format!(
                    "server.base_url must use http or https, got '{}'",
                    url.scheme()
                ),
            });
        }
    }

    if config.server.request_timeout_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "server.request_timeout_secs must be > 0".to_string(),
        });
    }

    if config.poll.interval_ms == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "poll.interval_ms must be > 0".to_string(),
        });
    }

    if let Some(ref prefix) = config.star.path_prefix
        && (!prefix.starts_with('/') || !prefix.ends_with('/'))
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("star.path_prefix must start and end with '/', got '{}'", prefix),
        });
    }

    Ok(())
}
