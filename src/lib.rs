//! # Recipe Pantry
//!
//! Ingredient text processing for a recipe-management backend: parses
//! free-text ingredient lines, normalizes units, and consolidates ingredients
//! from several recipes into a grocery list ordered by store aisle.

pub mod categorizer;
pub mod combiner;
pub mod config;
pub mod conversion;
pub mod errors;
pub mod meal_plan;
pub mod observability;
pub mod observability_config;
pub mod text_processing;
pub mod units;
pub mod validation;

// Re-export types for easier access
pub use categorizer::{categorize, Category};
pub use combiner::{build_grocery_list, combine_all, ConsolidatedItem};
pub use text_processing::{parse_ingredient, ParsedIngredient};
pub use units::{combine, normalize};
