use board_config::ConfigError;
use board_protocol::ProtocolError;

/// All error types for the board-client crate.
///
/// Each poll cycle or dispatch yields at most one of these. None are fatal;
/// the poller logs and reschedules, the dispatcher hands them to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    ClientInit(String),

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("dispatch task ended abnormally: {0}")]
    TaskAborted(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Error code string for logs and CLI output.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::ClientInit(_) => "client_init_failed",
            ClientError::Transport { .. } => "transport_error",
            ClientError::Timeout { .. } => "timeout",
            ClientError::Status { .. } => "http_status",
            ClientError::MalformedResponse { .. } => "malformed_response",
            ClientError::TaskAborted(_) => "task_aborted",
            ClientError::Protocol(e) => e.error_code(),
            ClientError::Config(_) => "config_error",
        }
    }

    /// Whether this error is caused by user input.
    pub fn is_user_error(&self) -> bool {
        match self {
            ClientError::Protocol(_) => true,
            ClientError::Config(e) => e.is_user_error(),
            _ => false,
        }
    }

    /// Whether a later attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Transport { .. } | ClientError::Timeout { .. } => true,
            ClientError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
