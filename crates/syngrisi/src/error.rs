// Error types for syngrisi-rs

use thiserror::Error;

/// Result type alias for syngrisi-rs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when running visual checks
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is missing or malformed
    ///
    /// Raised when a required setting (such as the API key) is absent from
    /// the environment, or when a provided value cannot be used.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The service base URL (or a path joined onto it) is not a valid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level HTTP error talking to the comparison service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The comparison service answered with a non-success status
    #[error("Comparison service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (artifact files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A baseline references a snapshot record the service no longer has
    #[error("Snapshot not found: '{0}'")]
    SnapshotNotFound(String),

    /// Browser driver failure during capture, scrolling, or evaluation
    #[error("Driver error: {0}")]
    Driver(String),

    /// Timeout waiting for a page lifecycle event
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid argument provided to a method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A visual check compared against its baseline and did not match
    ///
    /// `message` embeds the fail reasons reported by the service, the review
    /// link, and the structured diff payload when one was returned.
    #[error("{message}")]
    CheckFailed {
        name: String,
        reasons: Vec<String>,
        message: String,
    },

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }
}
