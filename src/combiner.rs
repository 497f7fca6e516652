//! # Ingredient Combiner
//!
//! Merges parsed ingredients from one or more recipes into a consolidated
//! grocery list.
//!
//! ## Grouping
//!
//! Items are processed in input order. Each item joins the first existing
//! group whose name is contained in the item's name (or the reverse), or that
//! shares at least one word with it, provided both use the same unit after
//! alias resolution. Otherwise the item starts a new group. The heuristic is
//! greedy, so the same items in a different order can group differently.
//!
//! ## Aggregation
//!
//! - quantities with a unit are summed through [`crate::units::combine`]
//! - quantities without a unit are listed as `"1.0 + 2.0"`
//! - groups without any quantity have no display quantity

use crate::categorizer::{categorize, Category};
use crate::text_processing::{parse_ingredient_block, ParsedIngredient};
use crate::units::{self, canonical_unit, format_quantity};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, trace};

/// A merged grocery-list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedItem {
    /// Name of the first ingredient that started the group
    pub name: String,
    /// Store-aisle category
    pub category: Category,
    /// Display unit after re-normalization
    pub unit: Option<String>,
    /// Combined amount, or a `+`-joined list when no unit applies
    pub display_quantity: Option<String>,
}

impl fmt::Display for ConsolidatedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(quantity) = &self.display_quantity {
            parts.push(quantity);
        }
        if let Some(unit) = &self.unit {
            parts.push(unit);
        }
        parts.push(&self.name);
        write!(f, "{}", parts.join(" "))
    }
}

#[derive(Debug)]
struct IngredientGroup {
    name: String,
    unit: Option<String>,
    category: Category,
    quantities: Vec<f64>,
}

impl IngredientGroup {
    fn new(name: &str, unit: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            unit,
            category: categorize(name),
            quantities: Vec::new(),
        }
    }

    fn accepts(&self, name: &str, unit: &Option<String>) -> bool {
        self.unit == *unit && names_similar(&self.name, name)
    }

    fn consolidate(self) -> ConsolidatedItem {
        let (unit, display_quantity) = match (self.unit, self.quantities.is_empty()) {
            (unit, true) => (unit, None),
            (Some(unit), false) => {
                let (total, display_unit) = units::combine(&self.quantities, &unit);
                let display = if total > 0.0 {
                    Some(format_quantity(total))
                } else {
                    None
                };
                (Some(display_unit), display)
            }
            (None, false) => {
                let joined = self
                    .quantities
                    .iter()
                    .map(|quantity| format_quantity(*quantity))
                    .collect::<Vec<String>>()
                    .join(" + ");
                (None, Some(joined))
            }
        };

        ConsolidatedItem {
            name: self.name,
            category: self.category,
            unit,
            display_quantity,
        }
    }
}

/// Whether two ingredient names describe the same grocery item
///
/// True when either name contains the other or they share a word.
pub fn names_similar(a: &str, b: &str) -> bool {
    if a.contains(b) || b.contains(a) {
        return true;
    }
    a.split_whitespace()
        .any(|word| b.split_whitespace().any(|other| other == word))
}

/// Combine parsed ingredients into an ordered grocery list
///
/// Items with an empty name are skipped. The result is sorted by category in
/// aisle order, then by name.
///
/// # Examples
///
/// ```rust
/// use recipe_pantry::combiner::combine_all;
/// use recipe_pantry::text_processing::parse_ingredient;
///
/// let items = vec![parse_ingredient("1 cup milk"), parse_ingredient("2 cups milk")];
/// let list = combine_all(&items);
///
/// assert_eq!(list.len(), 1);
/// assert_eq!(list[0].name, "milk");
/// assert_eq!(list[0].unit.as_deref(), Some("cup"));
/// assert_eq!(list[0].display_quantity.as_deref(), Some("3.0"));
/// ```
pub fn combine_all(items: &[ParsedIngredient]) -> Vec<ConsolidatedItem> {
    let mut groups: Vec<IngredientGroup> = Vec::new();

    for item in items {
        if item.name.is_empty() {
            trace!("Skipping ingredient with empty name: {:?}", item);
            continue;
        }

        let unit = item.unit.as_deref().map(canonical_unit);
        let index = match groups
            .iter()
            .position(|group| group.accepts(&item.name, &unit))
        {
            Some(index) => {
                debug!(
                    "Merging '{}' into group '{}'",
                    item.name, groups[index].name
                );
                index
            }
            None => {
                groups.push(IngredientGroup::new(&item.name, unit));
                groups.len() - 1
            }
        };

        if let Some(quantity) = item.quantity {
            groups[index].quantities.push(quantity);
        }
    }

    let mut consolidated: Vec<ConsolidatedItem> = groups
        .into_iter()
        .map(IngredientGroup::consolidate)
        .collect();

    consolidated.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.name.cmp(&b.name))
    });

    consolidated
}

/// Build one grocery list from several recipes' ingredient blocks
pub fn build_grocery_list(blocks: &[&str]) -> Vec<ConsolidatedItem> {
    let span = crate::observability::pipeline_span("build_grocery_list");
    let _guard = span.enter();
    let start_time = std::time::Instant::now();

    let parsed: Vec<ParsedIngredient> = blocks
        .iter()
        .flat_map(|block| parse_ingredient_block(block))
        .collect();
    let list = combine_all(&parsed);

    crate::observability::record_grocery_metrics(
        blocks.len(),
        parsed.len(),
        list.len(),
        start_time.elapsed(),
    );

    info!(
        recipes = blocks.len(),
        ingredients = parsed.len(),
        items = list.len(),
        "Built grocery list"
    );
    list
}
