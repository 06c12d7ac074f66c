//! Client side of the recipe catalog service.
//!
//! This crate provides:
//! - `CatalogService`: the five calls the aggregator needs (three filters,
//!   lookup by id, random record)
//! - `HttpCatalogClient`: a reqwest implementation against a
//!   TheMealDB-compatible JSON API
//! - `CatalogConfig`: where the service lives and how long to wait for it
//! - `InMemoryCatalog`: the same interface over a fixture, for offline use
//!   and tests
//!
//! No retries and no caching happen here; a failed call is reported once.

use async_trait::async_trait;
use model::{DetailRecord, ModelError, SummaryRecord};
use thiserror::Error;

pub mod config;
pub mod http;
pub mod memory;

pub use config::{CatalogConfig, DEFAULT_BASE_URL};
pub use http::HttpCatalogClient;
pub use memory::InMemoryCatalog;

/// Errors that can occur when talking to the catalog service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Failed to reach catalog service: {0}")]
    Transport(String),

    #[error("Catalog service returned HTTP {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Invalid response from catalog service: {0}")]
    MalformedResponse(String),

    #[error("Recipe {id} not found in catalog")]
    RecordNotFound { id: String },

    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),
}

impl From<ModelError> for CatalogError {
    fn from(err: ModelError) -> Self {
        CatalogError::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// The catalog endpoints the aggregator depends on.
///
/// Filters answer with an empty list when nothing matched. Lookups answer
/// with exactly one record or an error.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Summaries of recipes from one region, e.g. "Indian"
    async fn filter_by_origin(&self, origin: &str) -> Result<Vec<SummaryRecord>>;

    /// Summaries of recipes in one category, e.g. "Seafood"
    async fn filter_by_category(&self, category: &str) -> Result<Vec<SummaryRecord>>;

    /// Summaries of recipes using one main ingredient
    async fn filter_by_ingredient(&self, term: &str) -> Result<Vec<SummaryRecord>>;

    async fn lookup_by_id(&self, id: &str) -> Result<DetailRecord>;

    async fn random_record(&self) -> Result<DetailRecord>;
}
