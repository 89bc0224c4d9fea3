//! Error types and handling for `TripScout`

use thiserror::Error;

/// Main error type for the `TripScout` application.
///
/// Only configuration errors ever reach the user as errors; upstream
/// API and parse failures are caught inside the lookups and rendered
/// as fixed reply sentences.
#[derive(Error, Debug)]
pub enum TripScoutError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API returned a non-success status
    #[error("API error: {message}")]
    Api { message: String },

    /// Upstream response body could not be decoded
    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl TripScoutError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}
