/// Errors raised while building protocol values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid url '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("subject id must not be empty")]
    EmptySubject,

    #[error("subject id '{subject}' is a relative path segment")]
    DotSegmentSubject { subject: String },

    #[error("invalid timestamp '{value}': expected integer seconds or YYYY-MM-DDTHH:MM:SS")]
    InvalidTimestamp { value: String },
}

impl ProtocolError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ProtocolError::InvalidUrl { .. } => "invalid_url",
            ProtocolError::EmptySubject => "empty_subject",
            ProtocolError::DotSegmentSubject { .. } => "dot_segment_subject",
            ProtocolError::InvalidTimestamp { .. } => "invalid_timestamp",
        }
    }
}
