//! Core trait for turning record ids into full records.
//!
//! Every query first gets summaries from a filter endpoint, then resolves
//! each id with a lookup call. How those lookups are scheduled, and what a
//! single failure does to the rest, is the `Resolver`'s job.

use async_trait::async_trait;
use catalog_client::{CatalogError, CatalogService};
use model::{DetailRecord, RecipeId};

/// Strategy for resolving a batch of ids against the catalog.
///
/// ## Design Note
/// - `Send + Sync` so one resolver can be shared by every query the
///   aggregator runs
/// - Resolvers borrow the catalog; they never own it
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Returns the name of this strategy (for logging)
    fn name(&self) -> &str;

    /// Resolve `ids` into full records.
    ///
    /// # Returns
    /// * `Ok(Vec<DetailRecord>)` - resolved records, in the order of `ids`
    /// * `Err` - only for strategies that abort on failure
    async fn resolve(
        &self,
        catalog: &dyn CatalogService,
        ids: &[RecipeId],
    ) -> Result<Vec<DetailRecord>, CatalogError>;
}
