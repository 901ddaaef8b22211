//! Error type definitions
//!
//! Provides error classification for the fetch/cache/render pipeline and the
//! supporting configuration and storage layers.

use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more stored credentials are absent
    #[error("Missing credentials: {missing}")]
    AuthMissing {
        /// Comma-separated names of the absent credential fields
        missing: String,
    },

    /// A portal API call returned a non-success status or failed in transit
    #[error("API request to {endpoint} failed: {message}")]
    Api {
        /// The endpoint that failed
        endpoint: String,
        /// HTTP status code, if a response was received
        status: Option<u16>,
        /// Error message describing the failure
        message: String,
    },

    /// Storage operation errors
    #[error("Storage error during {operation}: {details}")]
    Storage {
        /// The storage operation that failed
        operation: String,
        /// Detailed error description
        details: String,
    },

    /// The combined payload does not have the expected shape
    #[error("Invalid usage data: {details}")]
    DataShape {
        /// Detailed error description
        details: String,
    },

    /// Configuration errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// Analytics delivery errors. Never surfaced to the user; logged and
    /// swallowed by the telemetry client.
    #[error("Analytics error: {message}")]
    Analytics {
        /// Error message describing the delivery failure
        message: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an auth-missing error from the names of the absent fields
    pub fn auth_missing(missing: &[&str]) -> Self {
        Self::AuthMissing {
            missing: missing.join(", "),
        }
    }

    /// Create an API error without a status code
    pub fn api(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Create an API error with the response status
    pub fn api_status<S: Into<String>>(endpoint: S, status: u16) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status: Some(status),
            message: format!("HTTP status {}", status),
        }
    }

    /// Create a storage error
    pub fn storage(operation: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Create a data-shape error
    pub fn data_shape<S: Into<String>>(details: S) -> Self {
        Self::DataShape {
            details: details.into(),
        }
    }

    /// Create a configuration error
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an analytics error
    pub fn analytics<S: Into<String>>(message: S) -> Self {
        Self::Analytics {
            message: message.into(),
        }
    }

    /// Get error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(..) => "http",
            Error::Json(..) => "json",
            Error::Io(..) => "io",
            Error::AuthMissing { .. } => "auth_missing",
            Error::Api { .. } => "api",
            Error::Storage { .. } => "storage",
            Error::DataShape { .. } => "data_shape",
            Error::Config { .. } => "config",
            Error::Analytics { .. } => "analytics",
        }
    }

    /// The single message shown to the user for this error.
    ///
    /// Every internal failure collapses to one of a few fixed strings; the
    /// detail stays in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::AuthMissing { .. } => {
                "Session data is missing. Log in to the MySLT portal and store your credentials with `slt-usage login`."
            }
            Error::Http(..) | Error::Api { .. } => {
                "Error fetching data. Your session might have expired. Please try re-login."
            }
            Error::DataShape { .. } => "Invalid usage data received",
            Error::Storage { .. } => "Error clearing data. Please try again.",
            _ => "An unexpected error occurred. Please try again later.",
        }
    }
}
