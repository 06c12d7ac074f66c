//! Core domain types for the recipe catalog.
//!
//! This module defines the records the rest of the workspace passes around:
//! - `SummaryRecord`: what a filter query returns (id + name)
//! - `DetailRecord`: the full recipe, resolved through a lookup by id
//! - `QueryLabel`: which query produced a result list
//!
//! Records are immutable once decoded and are discarded on the next query.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque catalog identifier for a recipe (e.g. "52772").
///
/// The catalog hands these out as strings, and the only thing we ever do
/// with them is compare and send them back, so we keep them as strings.
pub type RecipeId = String;

/// Upper bound on (ingredient, measure) pairs a catalog record can carry.
pub const MAX_INGREDIENTS: usize = 20;

// =============================================================================
// Records
// =============================================================================

/// Minimal result of a filter query.
///
/// Never displayed directly; only used to drive detail lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub id: RecipeId,
    pub name: String,
    pub thumbnail: Option<String>,
}

impl SummaryRecord {
    pub fn new(id: impl Into<RecipeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: None,
        }
    }
}

/// One line of a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// `None` when the catalog left the measure blank
    pub measure: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, measure: Option<&str>) -> Self {
        Self {
            name: name.into(),
            measure: measure.map(str::to_string),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.measure {
            Some(measure) => write!(f, "{} {}", measure, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A fully resolved recipe.
///
/// The `id` is stable and is the deduplication key whenever result sets
/// from several queries are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: RecipeId,
    pub name: String,
    /// Free-text region label, e.g. "Indian" or "Italian"
    pub origin: Option<String>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    /// Ordered, at most `MAX_INGREDIENTS` entries, blank pairs already dropped
    pub ingredients: Vec<Ingredient>,
    /// May contain line breaks
    pub instructions: String,
    pub video_url: Option<String>,
    pub tags: Option<String>,
}

impl DetailRecord {
    /// Create a record with just an id and a name; everything else empty.
    ///
    /// Handy for tests and fakes, real records come from `wire`.
    pub fn new(id: impl Into<RecipeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            origin: None,
            category: None,
            thumbnail: None,
            ingredients: Vec::new(),
            instructions: String::new(),
            video_url: None,
            tags: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Exact, case-sensitive comparison against the origin label.
    pub fn is_from(&self, origin: &str) -> bool {
        self.origin.as_deref() == Some(origin)
    }

    /// Tags split on commas, trimmed, blanks dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Instructions broken into non-empty paragraphs.
    pub fn instruction_paragraphs(&self) -> Vec<&str> {
        self.instructions
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

// =============================================================================
// Query Labels
// =============================================================================

/// Describes the query a result list came from.
///
/// Returned next to every result instead of living in shared state. The only
/// consumer is the presenter, which shows an aggregate summary line for
/// `All` lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryLabel {
    /// Mixed cuisines on the landing page
    All,
    Origin(String),
    Category(String),
    Ingredient(String),
    OriginIngredient { origin: String, term: String },
    Random,
    Recipe(RecipeId),
}

impl QueryLabel {
    /// Whether the "Showing N recipes from around the world" line applies.
    pub fn shows_summary(&self) -> bool {
        matches!(self, QueryLabel::All)
    }
}

impl fmt::Display for QueryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryLabel::All => write!(f, "all"),
            QueryLabel::Origin(origin) => write!(f, "{}", origin),
            QueryLabel::Category(category) => write!(f, "{}", category),
            QueryLabel::Ingredient(term) => write!(f, "{}", term),
            QueryLabel::OriginIngredient { origin, term } => {
                write!(f, "{}-{}", origin.to_lowercase(), term)
            }
            QueryLabel::Random => write!(f, "random"),
            QueryLabel::Recipe(id) => write!(f, "recipe-{}", id),
        }
    }
}
