//! Error types module
//!
//! All failures of the attachment pipeline are unified under [`AttachError`].
//! Gate rejections are not errors and never surface here; only the upload
//! pipeline, configuration and the config stores produce these values.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed input
    Debug,
    /// Warning level - for recoverable issues like an unreadable config store
    Warn,
    /// Error level - for failed uploads
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    #[error("Invalid document location: {0}")]
    InvalidLocation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Upload rejected with status {status}: {body}")]
    UploadRejected { status: u16, body: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config store error: {0}")]
    Store(String),

    #[error("Upload task failed: {0}")]
    TaskFailed(String),
}

/// Result type for attachment operations
pub type AttachResult<T> = Result<T, AttachError>;

impl AttachError {
    /// Machine-readable error code (e.g., "UPLOAD_REJECTED")
    pub fn error_code(&self) -> &'static str {
        match self {
            AttachError::InvalidLocation(_) => "INVALID_LOCATION",
            AttachError::Transport(_) => "TRANSPORT_ERROR",
            AttachError::UploadRejected { .. } => "UPLOAD_REJECTED",
            AttachError::InvalidRequest(_) => "INVALID_REQUEST",
            AttachError::Config(_) => "CONFIG_ERROR",
            AttachError::Store(_) => "STORE_ERROR",
            AttachError::TaskFailed(_) => "TASK_FAILED",
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            AttachError::InvalidLocation(_) | AttachError::InvalidRequest(_) => LogLevel::Debug,
            AttachError::Config(_) | AttachError::Store(_) => LogLevel::Warn,
            AttachError::Transport(_)
            | AttachError::UploadRejected { .. }
            | AttachError::TaskFailed(_) => LogLevel::Error,
        }
    }

    /// HTTP status of a rejected upload, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AttachError::UploadRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for AttachError {
    fn from(err: url::ParseError) -> Self {
        AttachError::InvalidLocation(err.to_string())
    }
}

impl From<std::io::Error> for AttachError {
    fn from(err: std::io::Error) -> Self {
        AttachError::Store(format!("IO error: {}", err))
    }
}
