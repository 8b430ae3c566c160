//! Error type for remote collection calls.

/// Failure of a call to the remote collection service.
///
/// Network errors, non-success statuses and malformed payloads all map to
/// this one type. The message and status are diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyncError {
    message: String,
    status: Option<u16>,
}

impl SyncError {
    /// Create an error from a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Create an error for a non-success HTTP response.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("remote returned status {}", status)
        } else {
            format!("remote returned status {}: {}", status, body)
        };
        Self {
            message,
            status: Some(status),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("malformed payload: {}", err))
    }
}

/// Result type for remote calls.
pub type Result<T> = std::result::Result<T, SyncError>;
