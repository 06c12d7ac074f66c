//! Error types for the aggregator crate.
//!
//! Two ways a query can fail:
//! - `Validation`: the user's input was unusable (blank search term)
//! - `Network`: a required catalog call failed
//!
//! An empty result is not an error; see `QueryOutcome::Empty`.

use catalog_client::CatalogError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Invalid query: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] CatalogError),
}

impl AggregateError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AggregateError::Validation(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, AggregateError::Network(_))
    }
}

pub type Result<T> = std::result::Result<T, AggregateError>;
