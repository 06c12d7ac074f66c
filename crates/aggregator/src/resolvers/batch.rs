//! Resolve every id at once and give up on the first failure.
//!
//! Used for user-initiated searches, where latency matters more than
//! salvaging a partial page.

use crate::traits::Resolver;
use async_trait::async_trait;
use catalog_client::{CatalogError, CatalogService};
use futures::future::try_join_all;
use model::{DetailRecord, RecipeId};
use tracing::{debug, warn};

/// Issues all lookups without waiting on each other.
///
/// ## Algorithm
/// `try_join_all` polls every lookup concurrently, keeps results in input
/// order, and returns the first error it sees, dropping the lookups still in
/// flight.
pub struct BatchAllOrFail;

#[async_trait]
impl Resolver for BatchAllOrFail {
    fn name(&self) -> &str {
        "BatchAllOrFail"
    }

    async fn resolve(
        &self,
        catalog: &dyn CatalogService,
        ids: &[RecipeId],
    ) -> Result<Vec<DetailRecord>, CatalogError> {
        debug!("Resolving {} ids concurrently", ids.len());
        let records = try_join_all(ids.iter().map(|id| catalog.lookup_by_id(id)))
            .await
            .map_err(|e| {
                warn!("Batch of {} lookups aborted: {}", ids.len(), e);
                e
            })?;
        Ok(records)
    }
}
