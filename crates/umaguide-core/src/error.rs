//! Error types for the guide data core.
//!
//! Only [`GuideError::DataUnavailable`] escapes the loader. The remaining
//! variants describe why a particular source was rejected and travel inside it
//! as the diagnostic cause.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the guide data core.
#[derive(Debug, Error)]
pub enum GuideError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// HTTP status when the server answered with a non-2xx code.
        status: Option<u16>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    // Payload errors
    #[error("Invalid dataset: {message}")]
    Validation { message: String },

    #[error("Character data unavailable: {cause}")]
    DataUnavailable {
        #[source]
        cause: Box<GuideError>,
    },

    // Cache errors
    #[error("Failed to write cache entry {key}: {message}")]
    CacheWrite { key: String, message: String },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for guide operations.
pub type Result<T> = std::result::Result<T, GuideError>;

impl From<std::io::Error> for GuideError {
    fn from(err: std::io::Error) -> Self {
        GuideError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for GuideError {
    fn from(err: serde_json::Error) -> Self {
        GuideError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for GuideError {
    fn from(err: rusqlite::Error) -> Self {
        GuideError::Storage {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for GuideError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GuideError::Timeout(std::time::Duration::from_secs(0))
        } else {
            GuideError::Network {
                message: err.to_string(),
                status: err.status().map(|s| s.as_u16()),
            }
        }
    }
}

impl GuideError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        GuideError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        GuideError::Validation {
            message: message.into(),
        }
    }

    /// Wrap the last failure seen by the loader.
    pub fn unavailable(cause: GuideError) -> Self {
        GuideError::DataUnavailable {
            cause: Box::new(cause),
        }
    }

    /// Check if this error should trigger a retry.
    ///
    /// Transport failures, timeouts and 408/429/5xx responses are retryable;
    /// other HTTP statuses are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            GuideError::Timeout(_) => true,
            GuideError::Network { status: None, .. } => true,
            GuideError::Network {
                status: Some(code), ..
            } => matches!(code, 408 | 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// The innermost cause of a `DataUnavailable` error, or `self`.
    pub fn root_cause(&self) -> &GuideError {
        match self {
            GuideError::DataUnavailable { cause } => cause.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GuideError::Network {
            message: "HTTP 404: Not Found".into(),
            status: Some(404),
        };
        assert_eq!(err.to_string(), "Network error: HTTP 404: Not Found");
    }

    #[test]
    fn test_unavailable_keeps_cause() {
        let err = GuideError::unavailable(GuideError::validation("characters is not an array"));
        assert!(err.to_string().contains("characters is not an array"));
        assert!(matches!(err.root_cause(), GuideError::Validation { .. }));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(GuideError::Timeout(std::time::Duration::from_secs(5)).is_retryable());
        assert!(GuideError::Network {
            message: "connection reset".into(),
            status: None
        }
        .is_retryable());
        assert!(GuideError::Network {
            message: "bad gateway".into(),
            status: Some(502)
        }
        .is_retryable());
        assert!(!GuideError::Network {
            message: "not found".into(),
            status: Some(404)
        }
        .is_retryable());
        assert!(!GuideError::validation("nope").is_retryable());
    }
}
