//! Error types for the model crate.
//!
//! These cover records that arrive well-formed as JSON but can't be turned
//! into our domain types. Transport failures live in `catalog-client`.

use thiserror::Error;

/// Errors that can occur while decoding catalog records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A field every record must have was absent or blank
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The payload wasn't valid JSON for the expected envelope
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Malformed(err.to_string())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ModelError>;
