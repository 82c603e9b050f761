//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.board/config.toml`
//! 3. **Project config** - `./.board/config.toml`
//! 4. **CLI arguments** - applied by the caller after loading

use std::fs;
use std::path::Path;

use crate::errors::ConfigError;
use crate::paths::BoardPaths;
use crate::types::{BoardConfig, PollConfig, ServerConfig, StarConfig};
use crate::validation::validate_config;

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a file exists but cannot be parsed, or if validation
/// fails. Missing config files are not errors.
pub fn load_hierarchy() -> Result<BoardConfig, ConfigError> {
    let user_config = match BoardPaths::resolve() {
        Ok(paths) => Some(paths.user_config()),
        Err(e) => {
            tracing::warn!(
                event = "config.home_dir_unavailable",
                error = %e,
                "Skipping user config"
            );
            None
        }
    };
    let project_config = BoardPaths::project_config(&std::env::current_dir()?);

    load_from_paths(user_config.as_deref(), &project_config)
}

/// Load and merge an explicit user/project pair. Used by `load_hierarchy` and tests.
pub fn load_from_paths(
    user_config: Option<&Path>,
    project_config: &Path,
) -> Result<BoardConfig, ConfigError> {
    let mut config = BoardConfig::default();

    if let Some(path) = user_config
        && let Some(user) = load_config_file(path)?
    {
        config = merge_configs(config, user);
    }

    if let Some(project) = load_config_file(project_config)? {
        config = merge_configs(config, project);
    }

    validate_config(&config)?;

    Ok(config)
}

/// Read one config file. `Ok(None)` when the file does not exist.
fn load_config_file(path: &Path) -> Result<Option<BoardConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let config = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!(event = "config.file_loaded", path = %path.display());

    Ok(Some(config))
}

/// Merge two configurations, with override_config taking precedence.
pub fn merge_configs(base: BoardConfig, override_config: BoardConfig) -> BoardConfig {
    BoardConfig {
        server: ServerConfig::merge(&base.server, &override_config.server),
        poll: PollConfig::merge(&base.poll, &override_config.poll),
        star: StarConfig::merge(&base.star, &override_config.star),
    }
}
