//! Resolve ids one after another, skipping the ones that fail.
//!
//! Used by the origin-filtered ingredient search, which scans a fixed window
//! of ids and keeps whatever matches.

use crate::traits::Resolver;
use async_trait::async_trait;
use catalog_client::{CatalogError, CatalogService};
use model::{DetailRecord, RecipeId};
use tracing::{debug, warn};

/// Sequential lookups; a failed lookup is logged and dropped.
///
/// Never returns `Err`.
pub struct BestEffortAccumulate;

#[async_trait]
impl Resolver for BestEffortAccumulate {
    fn name(&self) -> &str {
        "BestEffortAccumulate"
    }

    async fn resolve(
        &self,
        catalog: &dyn CatalogService,
        ids: &[RecipeId],
    ) -> Result<Vec<DetailRecord>, CatalogError> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match catalog.lookup_by_id(id).await {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping recipe {}: {}", id, e),
            }
        }
        debug!("Resolved {} of {} ids", records.len(), ids.len());
        Ok(records)
    }
}
