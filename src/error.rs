//! Error types and handling for the surfcast crate

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for surfcast
#[derive(Error, Debug)]
pub enum SurfcastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The forecast-point source failed for a beach
    #[error("Forecast source error: {message}")]
    SourceFetch { message: String },

    /// A whole forecast batch failed; carries the message of the failure that aborted it
    #[error("unexpected error during the forecast processing: {message}")]
    ForecastProcessing { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Body handed to callers that surface errors over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub error: String,
}

impl SurfcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new source fetch error
    pub fn source_fetch<S: Into<String>>(message: S) -> Self {
        Self::SourceFetch {
            message: message.into(),
        }
    }

    /// Wrap any failure as a batch-level processing error
    pub fn forecast_processing<S: Into<String>>(message: S) -> Self {
        Self::ForecastProcessing {
            message: message.into(),
        }
    }

    /// The bare message, without the kind prefix added by `Display`
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            SurfcastError::Config { message }
            | SurfcastError::Validation { message }
            | SurfcastError::SourceFetch { message }
            | SurfcastError::ForecastProcessing { message } => message.clone(),
            SurfcastError::Io { source } => source.to_string(),
        }
    }

    /// HTTP-style status code for this error kind
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            SurfcastError::Validation { .. } => 422,
            SurfcastError::SourceFetch { .. } => 502,
            SurfcastError::Config { .. }
            | SurfcastError::ForecastProcessing { .. }
            | SurfcastError::Io { .. } => 500,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SurfcastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SurfcastError::Validation { message } => format!("Invalid input: {message}"),
            SurfcastError::SourceFetch { .. } => {
                "Unable to reach the forecast provider. Please try again later.".to_string()
            }
            SurfcastError::ForecastProcessing { .. } => self.to_string(),
            SurfcastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }

    /// Build the `{code, error}` body for this error
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.status_code(),
            error: self.user_message(),
        }
    }
}
