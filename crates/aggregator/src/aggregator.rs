//! # Recipe Aggregator
//!
//! Runs every query the browser offers against a `CatalogService`:
//! 1. Filter the catalog (by origin, category or ingredient)
//! 2. Resolve the summary ids into full records
//! 3. Merge and deduplicate when several queries feed one page
//! 4. Fall back to alternate queries when a query comes back empty
//!
//! User-initiated searches resolve with `BatchAllOrFail`. The landing page
//! and the ingredient fallback resolve each group with
//! `AccumulateUntilFailure`, and the origin-filtered scan uses
//! `BestEffortAccumulate`.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use catalog_client::CatalogService;
use model::{DetailRecord, QueryLabel, RecipeId, SummaryRecord};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use crate::config::AggregatorConfig;
use crate::error::{AggregateError, Result};
use crate::outcome::{QueryOutcome, RecipeList};
use crate::recipe_set::RecipeSet;
use crate::resolvers::{AccumulateUntilFailure, BatchAllOrFail, BestEffortAccumulate};
use crate::shuffle::shuffle;
use crate::traits::Resolver;

/// Trim and lowercase a search term; blank terms are a validation error.
pub fn normalize_term(term: &str) -> Result<String> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Err(AggregateError::Validation(
            "Please enter an ingredient".to_string(),
        ));
    }
    Ok(term)
}

fn take_ids(summaries: &[SummaryRecord], limit: usize) -> Vec<RecipeId> {
    summaries.iter().take(limit).map(|s| s.id.clone()).collect()
}

/// Entry point for every catalog query.
#[derive(Clone)]
pub struct RecipeAggregator {
    catalog: Arc<dyn CatalogService>,
    config: AggregatorConfig,
    rng: Arc<Mutex<StdRng>>,
}

impl RecipeAggregator {
    /// Create an aggregator with the default configuration
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self::with_config(catalog, AggregatorConfig::default())
    }

    pub fn with_config(catalog: Arc<dyn CatalogService>, config: AggregatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            catalog,
            config,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Resolve `ids` with the given strategy.
    pub async fn resolve_details(
        &self,
        resolver: &dyn Resolver,
        ids: &[RecipeId],
    ) -> Result<Vec<DetailRecord>> {
        debug!("Resolving {} ids with {}", ids.len(), resolver.name());
        Ok(resolver.resolve(self.catalog.as_ref(), ids).await?)
    }

    /// Landing page: a few recipes from each configured cuisine plus some
    /// random ones, shuffled and capped.
    ///
    /// ## Algorithm
    /// 1. For each cuisine, filter by origin and resolve the first few ids
    ///    in order; a failed filter call skips that cuisine, a failed lookup
    ///    drops the rest of that cuisine's ids
    /// 2. Fetch random records, keeping only ids not already collected
    /// 3. Shuffle, truncate to the page limit
    /// 4. Nothing collected at all: fall back to common ingredients
    #[instrument(skip(self))]
    pub async fn load_mixed_recipes(&self) -> Result<QueryOutcome> {
        let start_time = Instant::now();
        let mut collected = RecipeSet::new();

        for cuisine in &self.config.mixed_cuisines {
            let summaries = match self.catalog.filter_by_origin(cuisine).await {
                Ok(summaries) => summaries,
                Err(e) => {
                    warn!("Error fetching {} recipes: {}", cuisine, e);
                    continue;
                }
            };
            let ids = take_ids(&summaries, self.config.per_cuisine);
            let records = self.resolve_details(&AccumulateUntilFailure, &ids).await?;
            let added = collected.extend(records);
            debug!("Collected {} {} recipes", added, cuisine);
        }

        for _ in 0..self.config.random_extras {
            match self.catalog.random_record().await {
                Ok(record) => {
                    let id = record.id.clone();
                    if !collected.insert(record) {
                        debug!("Random recipe {} already collected", id);
                    }
                }
                Err(e) => warn!("Error fetching random recipe: {}", e),
            }
        }

        let mut records = collected.into_vec();
        self.shuffle_and_truncate(&mut records);

        if records.is_empty() {
            info!("Landing page came back empty, trying common ingredients");
            return self.search_fallback_ingredients().await;
        }

        info!(
            "Loaded {} mixed recipes in {:.2?}",
            records.len(),
            start_time.elapsed()
        );
        Ok(QueryOutcome::listed(records, QueryLabel::All))
    }

    /// Recipes from one region.
    ///
    /// An empty region falls back to an origin+ingredient search with the
    /// last ingredient the user entered, if any.
    #[instrument(skip(self))]
    pub async fn load_by_origin(
        &self,
        origin: &str,
        last_term: Option<&str>,
    ) -> Result<QueryOutcome> {
        let summaries = self.catalog.filter_by_origin(origin).await?;

        if summaries.is_empty() {
            let term = last_term.map(str::trim).filter(|t| !t.is_empty());
            return match term {
                Some(term) => {
                    info!("No {} recipes, searching by ingredient '{}'", origin, term);
                    self.search_by_origin_and_ingredient(origin, term).await
                }
                None => Ok(QueryOutcome::empty(
                    QueryLabel::Origin(origin.to_string()),
                    format!("No recipes found for {} cuisine", origin),
                )),
            };
        }

        let ids = take_ids(&summaries, self.config.origin_limit);
        let records = self.resolve_details(&BatchAllOrFail, &ids).await?;
        info!("Loaded {} {} recipes", records.len(), origin);
        Ok(QueryOutcome::listed(
            records,
            QueryLabel::Origin(origin.to_string()),
        ))
    }

    /// Recipes using one ingredient, any origin.
    #[instrument(skip(self))]
    pub async fn search_by_ingredient(&self, term: &str) -> Result<QueryOutcome> {
        let term = normalize_term(term)?;
        let label = QueryLabel::Ingredient(term.clone());

        let summaries = self.catalog.filter_by_ingredient(&term).await?;
        if summaries.is_empty() {
            return Ok(QueryOutcome::empty(
                label,
                format!("No recipes found with \"{}\"", term),
            ));
        }

        let ids = take_ids(&summaries, self.config.ingredient_limit);
        let records = self.resolve_details(&BatchAllOrFail, &ids).await?;
        info!("Found {} recipes with '{}'", records.len(), term);
        Ok(QueryOutcome::listed(records, label))
    }

    /// Recipes using `term` that come from `origin`.
    ///
    /// When none of the scanned recipes match the origin, the first few
    /// recipes for the ingredient are returned instead with
    /// `used_fallback` set.
    #[instrument(skip(self))]
    pub async fn search_by_origin_and_ingredient(
        &self,
        origin: &str,
        term: &str,
    ) -> Result<QueryOutcome> {
        let term = normalize_term(term)?;
        let label = QueryLabel::OriginIngredient {
            origin: origin.to_string(),
            term: term.clone(),
        };
        let no_results = format!("No dishes found with \"{}\"", term);

        let summaries = self.catalog.filter_by_ingredient(&term).await?;
        if summaries.is_empty() {
            return Ok(QueryOutcome::empty(label, no_results));
        }

        let scan_ids = take_ids(&summaries, self.config.origin_scan_limit);
        let matches: Vec<DetailRecord> = self
            .resolve_details(&BestEffortAccumulate, &scan_ids)
            .await?
            .into_iter()
            .filter(|record| record.is_from(origin))
            .collect();

        if !matches.is_empty() {
            info!("Found {} {} recipes with '{}'", matches.len(), origin, term);
            return Ok(QueryOutcome::listed(matches, label));
        }

        let related_ids = take_ids(&summaries, self.config.related_limit);
        let related = self
            .resolve_details(&BestEffortAccumulate, &related_ids)
            .await?;
        if related.is_empty() {
            return Ok(QueryOutcome::empty(label, no_results));
        }

        info!(
            "No {} recipes with '{}', showing {} related recipes",
            origin,
            term,
            related.len()
        );
        Ok(QueryOutcome::Listed(RecipeList {
            records: related,
            label,
            used_fallback: true,
        }))
    }

    /// Recipes in one category.
    #[instrument(skip(self))]
    pub async fn load_by_category(&self, category: &str) -> Result<QueryOutcome> {
        let label = QueryLabel::Category(category.to_string());

        let summaries = self.catalog.filter_by_category(category).await?;
        if summaries.is_empty() {
            return Ok(QueryOutcome::empty(
                label,
                format!("No recipes found in {} category", category),
            ));
        }

        let ids = take_ids(&summaries, self.config.category_limit);
        let records = self.resolve_details(&BatchAllOrFail, &ids).await?;
        info!("Loaded {} {} recipes", records.len(), category);
        Ok(QueryOutcome::listed(records, label))
    }

    /// One random record.
    pub async fn load_random(&self) -> Result<DetailRecord> {
        Ok(self.catalog.random_record().await?)
    }

    /// Full record for the detail view.
    pub async fn lookup_recipe(&self, id: &str) -> Result<DetailRecord> {
        Ok(self.catalog.lookup_by_id(id).await?)
    }

    /// A few recipes for each common ingredient, deduplicated, shuffled and
    /// capped.
    #[instrument(skip(self))]
    pub async fn search_fallback_ingredients(&self) -> Result<QueryOutcome> {
        let mut collected = RecipeSet::new();

        for ingredient in &self.config.fallback_ingredients {
            let summaries = match self.catalog.filter_by_ingredient(ingredient).await {
                Ok(summaries) => summaries,
                Err(e) => {
                    warn!("Error fetching {}: {}", ingredient, e);
                    continue;
                }
            };
            let ids = take_ids(&summaries, self.config.per_fallback_ingredient);
            let records = self.resolve_details(&AccumulateUntilFailure, &ids).await?;
            let added = collected.extend(records);
            debug!("Collected {} new recipes with {}", added, ingredient);
        }

        let mut records = collected.into_vec();
        self.shuffle_and_truncate(&mut records);

        if records.is_empty() {
            return Ok(QueryOutcome::empty(
                QueryLabel::All,
                "No recipes found. Please try again.",
            ));
        }
        info!("Fallback collected {} recipes", records.len());
        Ok(QueryOutcome::listed(records, QueryLabel::All))
    }

    fn shuffle_and_truncate(&self, records: &mut Vec<DetailRecord>) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        shuffle(records, &mut *rng);
        records.truncate(self.config.page_limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_client::{CatalogError, InMemoryCatalog};
    use model::Ingredient;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn recipe(id: &str, name: &str, origin: &str, ingredient: &str) -> DetailRecord {
        let mut record = DetailRecord::new(id, name)
            .with_origin(origin)
            .with_category("Chicken");
        record.ingredients = vec![Ingredient::new(ingredient, Some("1"))];
        record
    }

    fn build_test_catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_records(vec![
            recipe("1", "Chicken Handi", "Indian", "chicken"),
            recipe("2", "Dal fry", "Indian", "lentils"),
            recipe("3", "Lasagne", "Italian", "pasta"),
            recipe("4", "Kung Pao Chicken", "Chinese", "chicken"),
            recipe("5", "Teriyaki Chicken", "Japanese", "chicken"),
        ])
    }

    fn build_test_aggregator(catalog: InMemoryCatalog) -> (RecipeAggregator, Arc<InMemoryCatalog>) {
        let catalog = Arc::new(catalog);
        let aggregator = RecipeAggregator::with_config(
            catalog.clone(),
            AggregatorConfig::default().with_seed(11),
        );
        (aggregator, catalog)
    }

    // ============================================================================
    // Unit Tests: normalize_term
    // ============================================================================

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  Chicken ").unwrap(), "chicken");
        assert!(normalize_term("   ").unwrap_err().is_validation());
        assert!(normalize_term("").is_err());
    }

    // ============================================================================
    // Unit Tests: single-record queries
    // ============================================================================

    #[tokio::test]
    async fn test_load_random() {
        let (aggregator, _) = build_test_aggregator(build_test_catalog());
        let record = aggregator.load_random().await.unwrap();
        assert_eq!(record.id, "1");
    }

    #[tokio::test]
    async fn test_lookup_recipe_unknown_id_is_network_error() {
        let (aggregator, _) = build_test_aggregator(build_test_catalog());
        let err = aggregator.lookup_recipe("999").await.unwrap_err();
        assert_eq!(
            err,
            AggregateError::Network(CatalogError::RecordNotFound { id: "999".into() })
        );
    }

    // ============================================================================
    // Unit Tests: load_by_origin
    // ============================================================================

    #[tokio::test]
    async fn test_load_by_origin_resolves_all() {
        let (aggregator, _) = build_test_aggregator(build_test_catalog());
        let outcome = aggregator.load_by_origin("Indian", None).await.unwrap();

        assert_eq!(outcome.label(), &QueryLabel::Origin("Indian".into()));
        let ids: Vec<&str> = outcome.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_load_by_origin_empty_without_term() {
        let (aggregator, _) = build_test_aggregator(build_test_catalog());
        let outcome = aggregator.load_by_origin("Thai", None).await.unwrap();
        assert_eq!(
            outcome,
            QueryOutcome::empty(
                QueryLabel::Origin("Thai".into()),
                "No recipes found for Thai cuisine"
            )
        );
    }

    #[tokio::test]
    async fn test_load_by_origin_falls_back_to_last_term() {
        let (aggregator, catalog) = build_test_aggregator(build_test_catalog());
        let outcome = aggregator
            .load_by_origin("Thai", Some("Chicken"))
            .await
            .unwrap();

        // No Thai chicken recipes, so related chicken recipes are shown
        let list = outcome.into_list().expect("should list related recipes");
        assert!(list.used_fallback);
        assert_eq!(list.len(), 3);
        assert!(catalog.calls().contains(&"filter i=chicken".to_string()));
    }

    #[tokio::test]
    async fn test_load_by_origin_fails_fast_on_lookup_error() {
        let mut catalog = build_test_catalog();
        catalog.fail_lookup("2");
        let (aggregator, _) = build_test_aggregator(catalog);

        let err = aggregator.load_by_origin("Indian", None).await.unwrap_err();
        assert!(err.is_network());
    }

    // ============================================================================
    // Unit Tests: load_by_category
    // ============================================================================

    #[tokio::test]
    async fn test_load_by_category_caps_at_limit() {
        let records = (0..30).map(|i| recipe(&i.to_string(), "Stew", "British", "beef"));
        let (aggregator, catalog) =
            build_test_aggregator(InMemoryCatalog::from_records(records));

        let outcome = aggregator.load_by_category("Chicken").await.unwrap();
        assert_eq!(outcome.records().len(), 18);
        assert_eq!(catalog.lookup_count(), 18);
    }

    #[tokio::test]
    async fn test_load_by_category_empty() {
        let (aggregator, _) = build_test_aggregator(build_test_catalog());
        let outcome = aggregator.load_by_category("Goat").await.unwrap();
        assert_eq!(
            outcome,
            QueryOutcome::empty(
                QueryLabel::Category("Goat".into()),
                "No recipes found in Goat category"
            )
        );
    }

    #[tokio::test]
    async fn test_load_by_category_filter_failure_is_network_error() {
        let mut catalog = build_test_catalog();
        catalog.fail_category("Chicken");
        let (aggregator, _) = build_test_aggregator(catalog);

        assert!(aggregator.load_by_category("Chicken").await.unwrap_err().is_network());
    }

    // ============================================================================
    // Unit Tests: search_by_ingredient
    // ============================================================================

    #[tokio::test]
    async fn test_search_by_ingredient_normalizes_term() {
        let (aggregator, catalog) = build_test_aggregator(build_test_catalog());
        let outcome = aggregator.search_by_ingredient("  CHICKEN ").await.unwrap();

        assert_eq!(outcome.label(), &QueryLabel::Ingredient("chicken".into()));
        assert_eq!(outcome.records().len(), 3);
        assert_eq!(catalog.calls()[0], "filter i=chicken");
    }

    #[tokio::test]
    async fn test_search_by_ingredient_rejects_blank_term() {
        let (aggregator, catalog) = build_test_aggregator(build_test_catalog());
        let err = aggregator.search_by_ingredient("  ").await.unwrap_err();

        assert!(err.is_validation());
        assert!(catalog.calls().is_empty(), "no request for a blank term");
    }

    #[tokio::test]
    async fn test_search_by_ingredient_no_results() {
        let (aggregator, _) = build_test_aggregator(build_test_catalog());
        let outcome = aggregator.search_by_ingredient("durian").await.unwrap();
        assert_eq!(
            outcome,
            QueryOutcome::empty(
                QueryLabel::Ingredient("durian".into()),
                "No recipes found with \"durian\""
            )
        );
    }

    // ============================================================================
    // Unit Tests: search_by_origin_and_ingredient
    // ============================================================================

    #[tokio::test]
    async fn test_origin_ingredient_exact_matches() {
        let (aggregator, _) = build_test_aggregator(build_test_catalog());
        let outcome = aggregator
            .search_by_origin_and_ingredient("Indian", "chicken")
            .await
            .unwrap();

        let list = outcome.into_list().unwrap();
        assert!(!list.used_fallback);
        assert_eq!(list.ids(), vec!["1"]);
    }

    #[tokio::test]
    async fn test_origin_ingredient_is_case_sensitive_on_origin() {
        let (aggregator, _) = build_test_aggregator(build_test_catalog());
        let outcome = aggregator
            .search_by_origin_and_ingredient("indian", "chicken")
            .await
            .unwrap();

        assert!(outcome.into_list().unwrap().used_fallback);
    }

    #[tokio::test]
    async fn test_origin_ingredient_no_summaries_is_empty_not_fallback() {
        let (aggregator, catalog) = build_test_aggregator(build_test_catalog());
        let outcome = aggregator
            .search_by_origin_and_ingredient("Indian", "durian")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            QueryOutcome::empty(
                QueryLabel::OriginIngredient {
                    origin: "Indian".into(),
                    term: "durian".into()
                },
                "No dishes found with \"durian\""
            )
        );
        assert_eq!(catalog.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_origin_ingredient_skips_failed_lookups() {
        let mut catalog = build_test_catalog();
        catalog.fail_lookup("4");
        let (aggregator, _) = build_test_aggregator(catalog);

        let outcome = aggregator
            .search_by_origin_and_ingredient("Japanese", "chicken")
            .await
            .unwrap();
        assert_eq!(outcome.into_list().unwrap().ids(), vec!["5"]);
    }

    // ============================================================================
    // Unit Tests: load_mixed_recipes / search_fallback_ingredients
    // ============================================================================

    #[tokio::test]
    async fn test_mixed_recipes_label_and_dedupe() {
        let (aggregator, catalog) = build_test_aggregator(build_test_catalog());
        let outcome = aggregator.load_mixed_recipes().await.unwrap();

        assert_eq!(outcome.label(), &QueryLabel::All);
        // All five records are reachable through cuisines; randoms add nothing
        assert_eq!(outcome.records().len(), 5);
        let mut ids: Vec<&str> = outcome.records().iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(
            catalog.calls().iter().filter(|c| *c == "random").count(),
            5
        );
    }

    #[tokio::test]
    async fn test_mixed_recipes_falls_back_when_empty() {
        let mut catalog = InMemoryCatalog::new();
        catalog.fail_random();
        let (aggregator, catalog) = build_test_aggregator(catalog);

        let outcome = aggregator.load_mixed_recipes().await.unwrap();
        assert_eq!(
            outcome,
            QueryOutcome::empty(QueryLabel::All, "No recipes found. Please try again.")
        );
        // Every fallback ingredient was tried
        assert!(catalog.calls().contains(&"filter i=egg".to_string()));
    }

    fn single_cuisine_aggregator(catalog: InMemoryCatalog) -> (RecipeAggregator, Arc<InMemoryCatalog>) {
        let catalog = Arc::new(catalog);
        let config = AggregatorConfig::default()
            .with_mixed_cuisines(["Chinese"])
            .with_random_extras(0)
            .with_seed(11);
        (RecipeAggregator::with_config(catalog.clone(), config), catalog)
    }

    fn chinese_catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_records(vec![
            recipe("c0", "Mapo Tofu", "Chinese", "tofu"),
            recipe("c1", "Chow Mein", "Chinese", "noodles"),
            recipe("c2", "Char Siu", "Chinese", "pork"),
        ])
    }

    #[tokio::test]
    async fn test_mixed_recipes_failed_lookup_drops_rest_of_cuisine() {
        let mut catalog = chinese_catalog();
        catalog.fail_lookup("c0");
        let (aggregator, catalog) = single_cuisine_aggregator(catalog);

        let outcome = aggregator.load_mixed_recipes().await.unwrap();

        // Nothing resolved for the only cuisine, so the ingredient fallback ran
        assert!(outcome.is_empty());
        let calls = catalog.calls();
        assert!(!calls.contains(&"lookup c1".to_string()));
        assert!(!calls.contains(&"lookup c2".to_string()));
        assert!(calls.contains(&"filter i=chicken".to_string()));
    }

    #[tokio::test]
    async fn test_mixed_recipes_keep_records_before_failed_lookup() {
        let mut catalog = chinese_catalog();
        catalog.fail_lookup("c1");
        let (aggregator, catalog) = single_cuisine_aggregator(catalog);

        let outcome = aggregator.load_mixed_recipes().await.unwrap();

        assert_eq!(outcome.records().len(), 1);
        assert_eq!(outcome.records()[0].id, "c0");
        assert!(!catalog.calls().contains(&"lookup c2".to_string()));
    }

    #[tokio::test]
    async fn test_fallback_ingredients_failed_lookup_moves_to_next_ingredient() {
        let mut catalog = InMemoryCatalog::from_records(vec![
            recipe("a", "Chicken Handi", "Indian", "chicken"),
            recipe("b", "Kung Pao Chicken", "Chinese", "chicken"),
            recipe("c", "Teriyaki Chicken", "Japanese", "chicken"),
            recipe("d", "Kedgeree", "British", "rice"),
        ]);
        catalog.fail_lookup("b");
        let (aggregator, catalog) = build_test_aggregator(catalog);

        let outcome = aggregator.search_fallback_ingredients().await.unwrap();

        let mut ids: Vec<&str> = outcome.records().iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "d"]);
        assert!(!catalog.calls().contains(&"lookup c".to_string()));
    }

    #[tokio::test]
    async fn test_fallback_ingredients_skip_failed_filter() {
        let mut catalog = build_test_catalog();
        catalog.fail_ingredient("chicken");
        let (aggregator, _) = build_test_aggregator(catalog);

        let outcome = aggregator.search_fallback_ingredients().await.unwrap();
        // Only the pasta recipe is reachable once chicken fails
        assert_eq!(outcome.records().len(), 1);
        assert_eq!(outcome.records()[0].id, "3");
    }

    #[tokio::test]
    async fn test_resolve_details_with_each_strategy() {
        let mut catalog = build_test_catalog();
        catalog.fail_lookup("2");
        let (aggregator, _) = build_test_aggregator(catalog);
        let ids: Vec<RecipeId> = vec!["1".into(), "2".into(), "3".into()];

        let partial = aggregator
            .resolve_details(&BestEffortAccumulate, &ids)
            .await
            .unwrap();
        assert_eq!(partial.len(), 2);

        let prefix = aggregator
            .resolve_details(&AccumulateUntilFailure, &ids)
            .await
            .unwrap();
        assert_eq!(prefix.len(), 1);

        let failed = aggregator.resolve_details(&BatchAllOrFail, &ids).await;
        assert!(failed.unwrap_err().is_network());
    }
}
