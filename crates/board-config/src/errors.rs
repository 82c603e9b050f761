#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("No server configured. Set [server] base_url in ~/.board/config.toml or pass --base-url")]
    MissingBaseUrl,

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::MissingBaseUrl => "MISSING_BASE_URL",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    pub fn is_user_error(&self) -> bool {
        !matches!(self, ConfigError::IoError { .. })
    }
}
