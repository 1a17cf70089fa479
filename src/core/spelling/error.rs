//! Spelling Error Types
//!
//! Errors raised outside the decision path: configuration, client
//! construction and scheduler misuse. Transport problems have their own
//! taxonomy and are folded into `ServiceFailure` before they reach the
//! service.

use thiserror::Error;

/// Crate-level errors
#[derive(Error, Debug)]
pub enum SpellError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("A scan pass is already running")]
    PassInProgress,

    #[error("Scan scheduler is disabled")]
    SchedulerDisabled,
}

/// Failures of a single remote exchange.
///
/// Only the HTTP provider sees these; they are converted to
/// `ServiceFailure::unavailable()` at the provider boundary.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl TransportError {
    /// Classify a reqwest error against the configured timeout
    pub fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(timeout_ms)
        } else if err.is_connect() || err.is_request() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Body(err.to_string())
        }
    }
}

/// Result type alias for fallible spelling operations
pub type Result<T> = std::result::Result<T, SpellError>;
