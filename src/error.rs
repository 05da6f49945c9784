// src/error.rs

//! Unified error handling for the client.

use std::fmt;

use thiserror::Error;

use crate::models::ErrorResponse;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Token could not be decoded
    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The server answered with a non-success status
    #[error("API error {status}: {}", .body.summary())]
    Api { status: u16, body: ErrorResponse },

    /// No valid session; the user has to log in first
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client-side form validation failed
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Persistent storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error carrying a single message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Create an authentication error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    /// Create a storage error.
    pub fn storage(message: impl fmt::Display) -> Self {
        Self::Storage(message.to_string())
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Messages a view should display for this error.
    ///
    /// Server validation errors are listed one by one, everything else
    /// collapses into a single line.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Api { body, .. } => body.messages(),
            Self::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_messages_prefer_validation_errors() {
        let err = AppError::Api {
            status: 400,
            body: ErrorResponse {
                validation_errors: Some(vec![
                    "Email is mandatory".to_string(),
                    "Password should be 8 characters minimum".to_string(),
                ]),
                ..ErrorResponse::default()
            },
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_validation_display_joins_messages() {
        let err = AppError::Validation(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Validation error: a; b");
    }

    #[test]
    fn test_other_errors_collapse_to_one_message() {
        let err = AppError::config("missing root url");
        assert_eq!(err.messages(), vec!["Configuration error: missing root url"]);
        assert_eq!(err.status(), None);
    }
}
