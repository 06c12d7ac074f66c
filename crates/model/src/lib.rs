//! # Model Crate
//!
//! Domain types for the recipe browser and decoding of the catalog's JSON.
//!
//! ## Main Components
//!
//! - **types**: `SummaryRecord`, `DetailRecord`, `Ingredient`, `QueryLabel`
//! - **wire**: turn `{"meals": [...]}` payloads into domain types
//! - **error**: decoding errors
//!
//! ## Example Usage
//!
//! ```ignore
//! use model::wire::parse_details;
//!
//! let records = parse_details(&body)?;
//! for record in &records {
//!     println!("{} ({})", record.name, record.origin.as_deref().unwrap_or("International"));
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod wire;

// Re-export commonly used types for convenience
pub use error::{ModelError, Result};
pub use types::{
    // Type aliases
    RecipeId,
    // Records
    DetailRecord,
    Ingredient,
    SummaryRecord,
    // Labels
    QueryLabel,
    MAX_INGREDIENTS,
};
