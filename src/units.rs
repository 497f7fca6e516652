//! # Unit Normalization
//!
//! Converts ingredient quantities between measurement units so that amounts
//! written in tablespoons, cups and millilitres can be summed on one scale
//! and then re-expressed in the unit that best communicates the total.
//!
//! ## Unit classes
//!
//! - **Volume**: base unit `ml` (`l`, `cup`, `tbsp`, `tsp`, `ml`)
//! - **Weight**: base unit `g` (`kg`, `lb`, `oz`, `g`)
//! - **Other**: everything else (`piece`, `pinch`, `can`, ...), passed through unconverted
//!
//! Spelling variants (`cups`, `tablespoon`, `grams`, `litres`) resolve to the
//! canonical table key through [`canonical_unit`].

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

/// Measurement class of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitClass {
    /// Liquid and spoon measures, summed in millilitres
    Volume,
    /// Mass measures, summed in grams
    Weight,
    /// Units with no conversion table (piece, pinch, can, ...)
    Other,
}

impl UnitClass {
    /// Canonical base unit for this class, `None` for pass-through units
    pub fn base_unit(&self) -> Option<&'static str> {
        match self {
            UnitClass::Volume => Some("ml"),
            UnitClass::Weight => Some("g"),
            UnitClass::Other => None,
        }
    }

    /// Conversion table for this class, sorted by multiplier descending
    fn table(&self) -> &'static [(&'static str, f64)] {
        match self {
            UnitClass::Volume => VOLUME_TABLE.as_slice(),
            UnitClass::Weight => WEIGHT_TABLE.as_slice(),
            UnitClass::Other => &[],
        }
    }
}

fn sorted_descending(mut table: Vec<(&'static str, f64)>) -> Vec<(&'static str, f64)> {
    table.sort_by(|a, b| b.1.total_cmp(&a.1));
    table
}

lazy_static! {
    static ref VOLUME_TABLE: Vec<(&'static str, f64)> = sorted_descending(vec![
        ("ml", 1.0),
        ("tsp", ML_PER_TSP),
        ("tbsp", ML_PER_TBSP),
        ("cup", ML_PER_CUP),
        ("l", ML_PER_LITER),
    ]);

    static ref WEIGHT_TABLE: Vec<(&'static str, f64)> = sorted_descending(vec![
        ("g", 1.0),
        ("oz", G_PER_OZ),
        ("lb", G_PER_LB),
        ("kg", G_PER_KG),
    ]);

    /// Spelling variant -> canonical unit key
    static ref UNIT_ALIASES: HashMap<&'static str, &'static str> = {
        let groups: [(&'static str, &[&'static str]); 15] = [
            ("cup", &["cup", "cups"]),
            ("tbsp", &["tbsp", "tablespoon", "tablespoons"]),
            ("tsp", &["tsp", "teaspoon", "teaspoons"]),
            ("ml", &["ml", "milliliter", "milliliters", "millilitre", "millilitres"]),
            ("l", &["l", "liter", "liters", "litre", "litres"]),
            ("oz", &["oz", "ounce", "ounces"]),
            ("lb", &["lb", "lbs", "pound", "pounds"]),
            ("g", &["g", "gram", "grams"]),
            ("kg", &["kg", "kilogram", "kilograms"]),
            ("pinch", &["pinch", "pinches"]),
            ("dash", &["dash", "dashes"]),
            ("piece", &["piece", "pieces"]),
            ("slice", &["slice", "slices"]),
            ("can", &["can", "cans"]),
            ("package", &["package", "packages", "pkg"]),
        ];

        let mut aliases = HashMap::new();
        for (canonical, variants) in groups {
            for variant in variants {
                aliases.insert(*variant, canonical);
            }
        }
        aliases
    };
}

/// Resolve a unit spelling to its canonical key
///
/// Unknown units are returned trimmed and lowercased.
///
/// # Examples
///
/// ```rust
/// use recipe_pantry::units::canonical_unit;
///
/// assert_eq!(canonical_unit("Cups"), "cup");
/// assert_eq!(canonical_unit("tablespoon"), "tbsp");
/// assert_eq!(canonical_unit("pinches"), "pinch");
/// assert_eq!(canonical_unit("sprig"), "sprig");
/// ```
pub fn canonical_unit(unit: &str) -> String {
    let lower = unit.trim().to_lowercase();
    match UNIT_ALIASES.get(lower.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => lower,
    }
}

/// Multiplier into the base unit, with the unit's class
fn lookup(unit: &str) -> Option<(UnitClass, f64)> {
    let canonical = canonical_unit(unit);
    for class in [UnitClass::Volume, UnitClass::Weight] {
        if let Some((_, multiplier)) = class.table().iter().find(|(key, _)| *key == canonical) {
            return Some((class, *multiplier));
        }
    }
    None
}

/// Determine the measurement class of a unit string
pub fn unit_class(unit: &str) -> UnitClass {
    lookup(unit).map(|(class, _)| class).unwrap_or(UnitClass::Other)
}

/// Convert a quantity into its class's base unit
///
/// Units without a conversion table are returned unchanged, so calling this
/// repeatedly on a pass-through unit is idempotent.
///
/// # Examples
///
/// ```rust
/// use recipe_pantry::units::normalize;
///
/// assert_eq!(normalize(1.0, "cup"), (236.588, "ml".to_string()));
/// assert_eq!(normalize(2.0, "kg"), (2000.0, "g".to_string()));
/// assert_eq!(normalize(5.0, "piece"), (5.0, "piece".to_string()));
/// ```
pub fn normalize(quantity: f64, unit: &str) -> (f64, String) {
    match lookup(unit) {
        Some((class, multiplier)) => {
            let base = class.base_unit().unwrap_or("ml");
            (quantity * multiplier, base.to_string())
        }
        None => (quantity, unit.to_string()),
    }
}

/// Sum quantities sharing one unit and re-express the total in a display unit
///
/// Every quantity is normalized to the base unit, summed, then converted to
/// the largest unit of the same class whose multiplier does not exceed the
/// total, rounded to two decimals. When the total is below every multiplier
/// the rounded base-unit total is returned.
///
/// # Examples
///
/// ```rust
/// use recipe_pantry::units::combine;
///
/// assert_eq!(combine(&[1.0, 1.0], "cup"), (2.0, "cup".to_string()));
/// assert_eq!(combine(&[500.0, 700.0], "ml"), (1.2, "l".to_string()));
/// assert_eq!(combine(&[], "cup"), (0.0, "cup".to_string()));
/// ```
pub fn combine(quantities: &[f64], unit: &str) -> (f64, String) {
    if quantities.is_empty() {
        return (0.0, unit.to_string());
    }

    let class = unit_class(unit);
    let mut base_unit = unit.to_string();
    let mut total = 0.0;
    for quantity in quantities {
        let (value, normalized_unit) = normalize(*quantity, unit);
        total += value;
        base_unit = normalized_unit;
    }

    for (display_unit, multiplier) in class.table() {
        if total >= *multiplier {
            let expressed = round_to_hundredths(total / multiplier);
            trace!(
                "Combined {} values of '{}' into {} {}",
                quantities.len(),
                unit,
                expressed,
                display_unit
            );
            return (expressed, display_unit.to_string());
        }
    }

    (round_to_hundredths(total), base_unit)
}

/// Round a value to two decimal places
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Human-readable form of a quantity
///
/// Rounds to two decimals and always keeps at least one decimal digit.
///
/// # Examples
///
/// ```rust
/// use recipe_pantry::units::format_quantity;
///
/// assert_eq!(format_quantity(3.0), "3.0");
/// assert_eq!(format_quantity(2.5), "2.5");
/// assert_eq!(format_quantity(1.0 / 3.0), "0.33");
/// ```
pub fn format_quantity(value: f64) -> String {
    let rounded = round_to_hundredths(value);
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_sorted_descending() {
        for class in [UnitClass::Volume, UnitClass::Weight] {
            let table = class.table();
            assert!(table.windows(2).all(|pair| pair[0].1 >= pair[1].1));
        }
    }

    #[test]
    fn test_unit_class() {
        assert_eq!(unit_class("cups"), UnitClass::Volume);
        assert_eq!(unit_class("Tablespoon"), UnitClass::Volume);
        assert_eq!(unit_class("lbs"), UnitClass::Weight);
        assert_eq!(unit_class("grams"), UnitClass::Weight);
        assert_eq!(unit_class("pinch"), UnitClass::Other);
        assert_eq!(unit_class("handful"), UnitClass::Other);
    }

    #[test]
    fn test_base_units() {
        assert_eq!(UnitClass::Volume.base_unit(), Some("ml"));
        assert_eq!(UnitClass::Weight.base_unit(), Some("g"));
        assert_eq!(UnitClass::Other.base_unit(), None);
    }

    #[test]
    fn test_combine_small_total_falls_back_to_base() {
        assert_eq!(combine(&[0.5], "g"), (0.5, "g".to_string()));
    }

    #[test]
    fn test_combine_pass_through_sums_in_place() {
        assert_eq!(combine(&[2.0, 3.0], "piece"), (5.0, "piece".to_string()));
    }

    #[test]
    fn test_round_to_hundredths() {
        assert_eq!(round_to_hundredths(2.999_999), 3.0);
        assert_eq!(round_to_hundredths(0.125_1), 0.13);
    }
}
