//! In-memory `CatalogService` backed by a list of full records.
//!
//! Filter results are derived from the records themselves, so a fixture
//! only has to list recipes once. Individual calls can be made to fail,
//! which is how the aggregator's skip-on-error paths get exercised.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use model::wire::parse_details;
use model::{DetailRecord, RecipeId, SummaryRecord};
use tracing::debug;

use crate::{CatalogError, CatalogService, Result};

/// Catalog held entirely in memory.
///
/// `random_record` walks the records round-robin so results stay
/// deterministic.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    records: Vec<DetailRecord>,
    by_id: HashMap<RecipeId, usize>,
    failing: HashSet<String>,
    random_cursor: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = DetailRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert_record(record);
        }
        catalog
    }

    /// Load a fixture file in the catalog's own `{"meals": [...]}` format.
    pub fn load_fixture(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::InvalidConfig(format!("Failed to read fixture {}: {}", path.display(), e))
        })?;
        let records = parse_details(&body)?;
        debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(Self::from_records(records))
    }

    /// Add a record, replacing any earlier record with the same id.
    pub fn insert_record(&mut self, record: DetailRecord) {
        match self.by_id.get(&record.id) {
            Some(&index) => self.records[index] = record,
            None => {
                self.by_id.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Make `filter_by_origin(origin)` fail with a transport error.
    pub fn fail_origin(&mut self, origin: &str) {
        self.failing.insert(format!("a:{}", origin));
    }

    pub fn fail_category(&mut self, category: &str) {
        self.failing.insert(format!("c:{}", category));
    }

    pub fn fail_ingredient(&mut self, term: &str) {
        self.failing.insert(format!("i:{}", term));
    }

    pub fn fail_lookup(&mut self, id: &str) {
        self.failing.insert(format!("lookup:{}", id));
    }

    pub fn fail_random(&mut self) {
        self.failing.insert("random".to_string());
    }

    /// Every call made so far, e.g. `["filter a=Indian", "lookup 52785"]`.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of lookups issued, handy for asserting on fan-out.
    pub fn lookup_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with("lookup "))
            .count()
    }

    fn record_call(&self, call: String) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }

    fn check(&self, key: &str) -> Result<()> {
        if self.failing.contains(key) {
            return Err(CatalogError::Transport(format!("injected failure for {}", key)));
        }
        Ok(())
    }

    fn summaries_where(&self, keep: impl Fn(&DetailRecord) -> bool) -> Vec<SummaryRecord> {
        self.records
            .iter()
            .filter(|record| keep(record))
            .map(|record| SummaryRecord {
                id: record.id.clone(),
                name: record.name.clone(),
                thumbnail: record.thumbnail.clone(),
            })
            .collect()
    }
}

/// The public catalog matches ingredient names case-insensitively and
/// accepts underscores in place of spaces.
fn ingredient_matches(name: &str, term: &str) -> bool {
    name.eq_ignore_ascii_case(&term.replace('_', " "))
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn filter_by_origin(&self, origin: &str) -> Result<Vec<SummaryRecord>> {
        self.record_call(format!("filter a={}", origin));
        self.check(&format!("a:{}", origin))?;
        Ok(self.summaries_where(|record| record.is_from(origin)))
    }

    async fn filter_by_category(&self, category: &str) -> Result<Vec<SummaryRecord>> {
        self.record_call(format!("filter c={}", category));
        self.check(&format!("c:{}", category))?;
        Ok(self.summaries_where(|record| record.category.as_deref() == Some(category)))
    }

    async fn filter_by_ingredient(&self, term: &str) -> Result<Vec<SummaryRecord>> {
        self.record_call(format!("filter i={}", term));
        self.check(&format!("i:{}", term))?;
        Ok(self.summaries_where(|record| {
            record
                .ingredients
                .iter()
                .any(|ingredient| ingredient_matches(&ingredient.name, term))
        }))
    }

    async fn lookup_by_id(&self, id: &str) -> Result<DetailRecord> {
        self.record_call(format!("lookup {}", id));
        self.check(&format!("lookup:{}", id))?;
        self.by_id
            .get(id)
            .map(|&index| self.records[index].clone())
            .ok_or_else(|| CatalogError::RecordNotFound { id: id.to_string() })
    }

    async fn random_record(&self) -> Result<DetailRecord> {
        self.record_call("random".to_string());
        self.check("random")?;
        if self.records.is_empty() {
            return Err(CatalogError::MalformedResponse(
                "random.php returned no record".into(),
            ));
        }
        let index = self.random_cursor.fetch_add(1, Ordering::Relaxed) % self.records.len();
        Ok(self.records[index].clone())
    }
}
