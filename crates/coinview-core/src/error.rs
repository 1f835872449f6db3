//! Error types for coinview-core
//!
//! Pages that declare a loader receive a `Result<_, FetchError>` and render
//! the error arm themselves.

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Route parameter missing or empty
    MissingParam,
    /// Request could not be sent or the connection failed
    NetworkError,
    /// Response body was not a usable quote
    DecodeError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::MissingParam => write!(f, "MISSING_PARAM"),
            ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorCode::DecodeError => write!(f, "DECODE_ERROR"),
        }
    }
}

/// Detailed error information for pages and JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error returned by loaders and exchange-rate sources
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Missing route parameter: {name}")]
    MissingParam { name: String },

    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            FetchError::MissingParam { .. } => ErrorCode::MissingParam,
            FetchError::Network { .. } => ErrorCode::NetworkError,
            FetchError::Decode { .. } => ErrorCode::DecodeError,
        }
    }

    /// True when the failure was caused by the request rather than upstream
    pub fn is_client_error(&self) -> bool {
        matches!(self, FetchError::MissingParam { .. })
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            FetchError::MissingParam { name } => details
                .with_suggestion(format!("Include a value for '{}' in the URL.", name)),
            FetchError::Network { .. } => details
                .with_suggestion("Check that the exchange-rate API is reachable.".to_string())
                .with_suggestion("Reload the page to try again.".to_string()),
            FetchError::Decode { .. } => details
                .with_suggestion("The API answered with an unexpected payload.".to_string())
                .with_suggestion("Check the asset symbol and the configured API key.".to_string()),
        }
    }
}

/// Result type with FetchError
pub type FetchResult<T> = Result<T, FetchError>;
