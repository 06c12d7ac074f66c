//! Query aggregation for the recipe browser.
//!
//! This crate provides:
//! - `Resolver` trait and its strategies (`BatchAllOrFail`,
//!   `BestEffortAccumulate`, `AccumulateUntilFailure`)
//! - `RecipeAggregator`, one method per query the browser offers
//! - `RecipeSet` for merging result sets by id
//! - A Fisher–Yates `shuffle`
//!
//! ## Architecture
//! Each query moves through the same stages:
//! 1. A filter call returns summaries
//! 2. A resolver turns summary ids into full records
//! 3. Results are merged, shuffled and capped where the query calls for it
//! 4. Empty results either fall back to another query or come back as
//!    `QueryOutcome::Empty`
//!
//! ## Example Usage
//! ```ignore
//! use aggregator::{AggregatorConfig, RecipeAggregator};
//! use catalog_client::{CatalogConfig, HttpCatalogClient};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(HttpCatalogClient::new(CatalogConfig::from_env())?);
//! let aggregator = RecipeAggregator::with_config(catalog, AggregatorConfig::default());
//!
//! let outcome = aggregator.search_by_ingredient("chicken").await?;
//! for record in outcome.records() {
//!     println!("{}", record.name);
//! }
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod outcome;
pub mod recipe_set;
pub mod resolvers;
pub mod shuffle;
pub mod traits;

// Re-export main types
pub use aggregator::{RecipeAggregator, normalize_term};
pub use config::AggregatorConfig;
pub use error::{AggregateError, Result};
pub use outcome::{QueryOutcome, RecipeList};
pub use recipe_set::RecipeSet;
pub use resolvers::{AccumulateUntilFailure, BatchAllOrFail, BestEffortAccumulate};
pub use shuffle::shuffle;
pub use traits::Resolver;
