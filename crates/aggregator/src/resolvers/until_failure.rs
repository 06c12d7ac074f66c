//! Resolve ids one after another and stop at the first failure.
//!
//! Used by the per-cuisine and per-ingredient loops that build the landing
//! page: one bad lookup drops the rest of that group, but what was already
//! resolved is kept and the outer loop carries on with the next group.

use crate::traits::Resolver;
use async_trait::async_trait;
use catalog_client::{CatalogError, CatalogService};
use model::{DetailRecord, RecipeId};
use tracing::{debug, warn};

/// Sequential lookups; the first failure ends the batch with the records
/// resolved before it.
///
/// Never returns `Err`.
pub struct AccumulateUntilFailure;

#[async_trait]
impl Resolver for AccumulateUntilFailure {
    fn name(&self) -> &str {
        "AccumulateUntilFailure"
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
                Err(e) => {
                    warn!(
                        "Lookup of {} failed, dropping {} remaining ids: {}",
                        id,
                        ids.len() - records.len() - 1,
                        e
                    );
                    break;
                }
            }
        }
        debug!("Resolved {} of {} ids", records.len(), ids.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_client::InMemoryCatalog;

    fn ids(raw: &[&str]) -> Vec<RecipeId> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_records(vec![
            DetailRecord::new("1", "Dal fry"),
            DetailRecord::new("2", "Kedgeree"),
            DetailRecord::new("3", "Biryani"),
        ])
    }

    #[tokio::test]
    async fn test_keeps_records_before_the_failure() {
        let mut catalog = catalog();
        catalog.fail_lookup("2");

        let records = AccumulateUntilFailure
            .resolve(&catalog, &ids(&["1", "2", "3"]))
            .await
            .unwrap();

        let got: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(got, vec!["1"]);
        // "3" is never looked up
        assert_eq!(catalog.calls(), vec!["lookup 1", "lookup 2"]);
    }

    #[tokio::test]
    async fn test_failure_on_first_id_yields_nothing() {
        let mut catalog = catalog();
        catalog.fail_lookup("1");

        let records = AccumulateUntilFailure
            .resolve(&catalog, &ids(&["1", "2", "3"]))
            .await
            .unwrap();

        assert!(records.is_empty());
        assert_eq!(catalog.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_also_stops() {
        let catalog = catalog();

        let records = AccumulateUntilFailure
            .resolve(&catalog, &ids(&["3", "404", "1"]))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "3");
    }

    #[tokio::test]
    async fn test_all_succeed() {
        let catalog = catalog();

        let records = AccumulateUntilFailure
            .resolve(&catalog, &ids(&["2", "1", "3"]))
            .await
            .unwrap();

        let got: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(got, vec!["2", "1", "3"]);
    }
}
