//! Error types for rentcal.

use thiserror::Error;

/// Errors that can occur in rentcal operations.
///
/// The `Display` output is what the calendar keeps for inline display, so
/// every message is written for an admin rather than a developer.
#[derive(Error, Debug)]
pub enum RentCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Could not reach the server: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No dates selected")]
    EmptySelection,

    #[error("Another update is already in progress")]
    Busy,
}

/// Result type alias for rentcal operations.
pub type RentCalResult<T> = Result<T, RentCalError>;
