//! Tunables for the aggregator: which cuisines make up the landing page,
//! how many results each query keeps, and the fallback ingredients.

/// Cuisines sampled for the landing page, in query order
pub const DEFAULT_CUISINES: [&str; 8] = [
    "Indian", "Italian", "Chinese", "Mexican", "Japanese", "Thai", "American", "French",
];

/// Common ingredients tried when the landing page comes back empty
pub const DEFAULT_FALLBACK_INGREDIENTS: [&str; 6] =
    ["chicken", "rice", "pasta", "potato", "fish", "egg"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    pub mixed_cuisines: Vec<String>,
    /// Summaries kept per cuisine on the landing page
    pub per_cuisine: usize,
    /// Extra random records fetched for the landing page
    pub random_extras: usize,
    /// Cap on shuffled pages (landing page and ingredient fallback)
    pub page_limit: usize,
    pub origin_limit: usize,
    pub ingredient_limit: usize,
    pub category_limit: usize,
    /// Summaries scanned for an origin match in origin+ingredient search
    pub origin_scan_limit: usize,
    /// Records shown when that scan finds no origin match
    pub related_limit: usize,
    pub fallback_ingredients: Vec<String>,
    pub per_fallback_ingredient: usize,
    /// Seed for the shuffle RNG; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            mixed_cuisines: DEFAULT_CUISINES.iter().map(|s| s.to_string()).collect(),
            per_cuisine: 3,
            random_extras: 5,
            page_limit: 24,
            origin_limit: 24,
            ingredient_limit: 24,
            category_limit: 18,
            origin_scan_limit: 20,
            related_limit: 12,
            fallback_ingredients: DEFAULT_FALLBACK_INGREDIENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            per_fallback_ingredient: 3,
            seed: None,
        }
    }
}

impl AggregatorConfig {
    pub fn with_mixed_cuisines<S: Into<String>>(mut self, cuisines: impl IntoIterator<Item = S>) -> Self {
        self.mixed_cuisines = cuisines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fallback_ingredients<S: Into<String>>(
        mut self,
        ingredients: impl IntoIterator<Item = S>,
    ) -> Self {
        self.fallback_ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Configure extra random records on the landing page (default: 5)
    pub fn with_random_extras(mut self, count: usize) -> Self {
        self.random_extras = count;
        self
    }

    /// Configure the shuffled page cap (default: 24)
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
