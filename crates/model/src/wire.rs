//! Decoding of the catalog's JSON payloads.
//!
//! Every endpoint answers with the same envelope:
//!
//! ```text
//! {"meals": [ {...}, {...} ]}    // results
//! {"meals": null}                // nothing matched
//! ```
//!
//! Filter endpoints return slim summaries (`idMeal`, `strMeal`,
//! `strMealThumb`). Lookup and random endpoints return the full record, where
//! ingredients are spread over numbered fields `strIngredient1..20` and
//! `strMeasure1..20`.

use crate::error::{ModelError, Result};
use crate::types::{DetailRecord, Ingredient, MAX_INGREDIENTS, SummaryRecord};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Top-level response shape shared by all endpoints
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}

/// A filter result as the catalog sends it
#[derive(Debug, Deserialize)]
pub struct MealSummaryWire {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
}

/// A full record as the catalog sends it.
///
/// The numbered ingredient/measure fields land in `numbered` and are
/// collected in order by `TryFrom`.
#[derive(Debug, Deserialize)]
pub struct MealDetailWire {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strYoutube")]
    pub youtube: Option<String>,
    #[serde(rename = "strTags")]
    pub tags: Option<String>,
    #[serde(flatten)]
    pub numbered: HashMap<String, Value>,
}

/// Trim and drop empty strings.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    non_blank(value).ok_or_else(|| ModelError::MissingField {
        field: field.to_string(),
    })
}

impl TryFrom<MealSummaryWire> for SummaryRecord {
    type Error = ModelError;

    fn try_from(wire: MealSummaryWire) -> Result<Self> {
        Ok(SummaryRecord {
            id: required(wire.id, "idMeal")?,
            name: required(wire.name, "strMeal")?,
            thumbnail: non_blank(wire.thumbnail),
        })
    }
}

impl MealDetailWire {
    fn numbered_field(&self, prefix: &str, index: usize) -> Option<&str> {
        self.numbered
            .get(&format!("{}{}", prefix, index))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Collect the numbered pairs, skipping any without an ingredient name.
    fn ingredients(&self) -> Vec<Ingredient> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|i| {
                let name = self.numbered_field("strIngredient", i)?;
                Some(Ingredient::new(name, self.numbered_field("strMeasure", i)))
            })
            .collect()
    }
}

impl TryFrom<MealDetailWire> for DetailRecord {
    type Error = ModelError;

    fn try_from(wire: MealDetailWire) -> Result<Self> {
        let ingredients = wire.ingredients();
        Ok(DetailRecord {
            id: required(wire.id, "idMeal")?,
            name: required(wire.name, "strMeal")?,
            origin: non_blank(wire.area),
            category: non_blank(wire.category),
            thumbnail: non_blank(wire.thumbnail),
            ingredients,
            instructions: wire.instructions.unwrap_or_default(),
            video_url: non_blank(wire.youtube),
            tags: non_blank(wire.tags),
        })
    }
}

/// Decode a filter response. `{"meals": null}` yields an empty list.
pub fn parse_summaries(body: &str) -> Result<Vec<SummaryRecord>> {
    let envelope: MealsEnvelope<MealSummaryWire> = serde_json::from_str(body)?;
    envelope
        .meals
        .unwrap_or_default()
        .into_iter()
        .map(SummaryRecord::try_from)
        .collect()
}

/// Decode a lookup or random response. `{"meals": null}` yields an empty list.
pub fn parse_details(body: &str) -> Result<Vec<DetailRecord>> {
    let envelope: MealsEnvelope<MealDetailWire> = serde_json::from_str(body)?;
    envelope
        .meals
        .unwrap_or_default()
        .into_iter()
        .map(DetailRecord::try_from)
        .collect()
}
