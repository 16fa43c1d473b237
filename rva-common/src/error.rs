//! Common error types for the review analyzer

use thiserror::Error;

/// Common result type for review analyzer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Caller-supplied input that is missing or malformed
///
/// The `Display` text is the message surfaced verbatim at the HTTP boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Review body absent or empty
    #[error("missing review_body")]
    MissingBody,

    /// Location absent or empty
    #[error("missing location")]
    MissingLocation,

    /// Location not in the whitelist
    #[error("invalid location")]
    InvalidLocation,

    /// Date filter value that is not a `YYYY-MM-DD` calendar date
    #[error("invalid {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
}

/// Errors across the review analyzer crates
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input or request parameter
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed dataset could not be read as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A review with this identifier is already stored
    #[error("Duplicate review id: {0}")]
    DuplicateId(String),
}

impl Error {
    /// True when the error was caused by caller input rather than the service
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
