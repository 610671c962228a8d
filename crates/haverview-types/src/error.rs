//! Error types for haverview.

use thiserror::Error;

/// Result type alias for haverview operations.
pub type Result<T> = std::result::Result<T, HaverError>;

/// Errors that can occur while talking to the Haver API and shaping its data.
///
/// A failed health probe is deliberately absent: connectivity problems are
/// reported through the client's active flag and a logged warning.
#[derive(Error, Debug)]
pub enum HaverError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(String),

    /// An argument was rejected before any request was made.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A series code could not be split into series and database.
    #[error("Invalid series code '{code}': expected SERIES@DATABASE")]
    InvalidCode {
        /// The code as given by the caller.
        code: String,
    },

    /// The response body did not match the expected shape.
    #[error("Unexpected response from {endpoint}: {source}")]
    Schema {
        /// Endpoint path that produced the response.
        endpoint: String,
        /// The underlying decoding error.
        source: serde_json::Error,
    },

    /// The response held no record where one was required.
    #[error("Empty response from {endpoint}")]
    EmptyResponse {
        /// Endpoint path that produced the response.
        endpoint: String,
    },

    /// A geography code has no entry in the country lookup table.
    #[error("Unknown geography code: {0}")]
    UnknownGeography(String),
}

impl HaverError {
    /// Builds an [`HaverError::InvalidArgument`].
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns true if the error was raised before any request was sent.
    #[must_use]
    pub const fn is_argument_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::InvalidCode { .. })
    }
}
