//! What a query hands back to its caller.

use model::{DetailRecord, QueryLabel};

/// A page of resolved records plus the label of the query that made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeList {
    pub records: Vec<DetailRecord>,
    pub label: QueryLabel,
    /// Set when an origin+ingredient search found no exact origin match and
    /// fell back to related recipes of any origin
    pub used_fallback: bool,
}

impl RecipeList {
    pub fn new(records: Vec<DetailRecord>, label: QueryLabel) -> Self {
        Self {
            records,
            label,
            used_fallback: false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many records come from `origin` (exact match).
    ///
    /// Feeds the "(K Indian dishes)" part of the summary line.
    pub fn origin_count(&self, origin: &str) -> usize {
        self.records.iter().filter(|r| r.is_from(origin)).count()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }
}

/// Result of a list query that reached the catalog successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Listed(RecipeList),
    /// Well-formed answer with nothing to show
    Empty { label: QueryLabel, message: String },
}

impl QueryOutcome {
    pub fn listed(records: Vec<DetailRecord>, label: QueryLabel) -> Self {
        QueryOutcome::Listed(RecipeList::new(records, label))
    }

    pub fn empty(label: QueryLabel, message: impl Into<String>) -> Self {
        QueryOutcome::Empty {
            label,
            message: message.into(),
        }
    }

    pub fn label(&self) -> &QueryLabel {
        match self {
            QueryOutcome::Listed(list) => &list.label,
            QueryOutcome::Empty { label, .. } => label,
        }
    }

    /// Records of a listed outcome; empty slice otherwise.
    pub fn records(&self) -> &[DetailRecord] {
        match self {
            QueryOutcome::Listed(list) => &list.records,
            QueryOutcome::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, QueryOutcome::Empty { .. })
    }

    pub fn into_list(self) -> Option<RecipeList> {
        match self {
            QueryOutcome::Listed(list) => Some(list),
            QueryOutcome::Empty { .. } => None,
        }
    }
}
