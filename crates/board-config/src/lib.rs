//! # board-config
//!
//! TOML configuration types, loading, and validation for the board client.
//!
//! Single source of truth for `BoardConfig`. Depends only on `board-protocol`.

mod defaults;
mod loading;
mod validation;

pub mod errors;
pub mod paths;
pub mod types;

pub use errors::ConfigError;
pub use loading::{load_from_paths, load_hierarchy, merge_configs};
pub use paths::BoardPaths;
pub use types::{BoardConfig, PollConfig, ServerConfig, StarConfig};
pub use validation::validate_config;

impl BoardConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}
