//! # Text Processing Module
//!
//! This module turns free-text ingredient lines into structured
//! quantity/unit/name records.
//!
//! ## Features
//!
//! - Bullet markers and parenthetical notes are discarded
//! - **Mixed numbers and fractions**: "2 1/2 cups" → 2.5, "1/2 cup" → 0.5
//! - **Unicode fractions**: "½ cup", "2¼ cups"
//! - **Glued units**: "500g butter" → 500, "g", "butter"
//! - Unit detection from a fixed vocabulary on a word boundary
//! - Graceful degradation: malformed numbers become `0.0`, never an error

use crate::units::format_quantity;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Units recognized by the line parser, in every accepted spelling
pub const RECOGNIZED_UNITS: &[&str] = &[
    "cup", "cups",
    "tablespoon", "tablespoons", "tbsp",
    "teaspoon", "teaspoons", "tsp",
    "ounce", "ounces", "oz",
    "pound", "pounds", "lb", "lbs",
    "gram", "grams", "g",
    "kilogram", "kilograms", "kg",
    "ml", "milliliter", "milliliters", "millilitre", "millilitres",
    "liter", "liters", "litre", "litres", "l",
    "pinch", "pinches",
    "dash", "dashes",
    "piece", "pieces",
    "slice", "slices",
    "can", "cans",
    "package", "packages", "pkg",
];

/// Unicode vulgar fractions and their values
const UNICODE_FRACTIONS: &[(char, f64)] = &[
    ('½', 0.5),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 0.25),
    ('¾', 0.75),
    ('⅕', 0.2),
    ('⅖', 0.4),
    ('⅗', 0.6),
    ('⅘', 0.8),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// A single ingredient line broken into its parts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Numeric amount, `None` when the line has no leading number
    pub quantity: Option<f64>,
    /// Recognized unit as written, lowercase (e.g. "cups", "tbsp")
    pub unit: Option<String>,
    /// Remaining description, lowercase, may be empty
    pub name: String,
}

/// Build the unit alternation, longest spelling first to avoid partial matches
fn build_unit_regex_pattern() -> String {
    let mut sorted_units: Vec<&str> = RECOGNIZED_UNITS.to_vec();
    sorted_units.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    sorted_units.dedup();

    let escaped_units: Vec<String> = sorted_units.into_iter().map(regex::escape).collect();

    format!(r"(?i)^(?P<unit>{})\b\.?", escaped_units.join("|"))
}

lazy_static! {
    static ref BULLET_PATTERN: Regex =
        Regex::new(r"^[-•*]\s*").expect("Bullet pattern should be valid");
    static ref PARENTHETICAL_PATTERN: Regex =
        Regex::new(r"\(.*?\)").expect("Parenthetical pattern should be valid");
    static ref NUMERIC_TOKEN: Regex = Regex::new(r"^(?:\d+\.?\d*|\.\d+)(?:/\S*)?$")
        .expect("Numeric token pattern should be valid");
    static ref UNICODE_FRACTION_TOKEN: Regex = Regex::new(r"^(?P<whole>\d*)(?P<fraction>[½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])$")
        .expect("Unicode fraction pattern should be valid");
    static ref GLUED_UNIT_TOKEN: Regex =
        Regex::new(r"^(?P<number>(?:\d+\.?\d*|\.\d+)(?:/\d+)?)(?P<unit>[a-z]+)\.?$")
            .expect("Glued unit pattern should be valid");
    static ref UNIT_PATTERN: Regex =
        Regex::new(&build_unit_regex_pattern()).expect("Unit pattern should be valid");
}

/// Check whether a word belongs to the recognized-unit vocabulary
pub fn is_recognized_unit(word: &str) -> bool {
    let lower = word.trim().to_lowercase();
    RECOGNIZED_UNITS.contains(&lower.as_str())
}

/// Value of a plain number or `a/b` fraction token
///
/// Malformed fractions (zero denominator, non-numeric side) are worth `0.0`.
fn numeric_token_value(token: &str) -> f64 {
    match token.split_once('/') {
        Some((numerator, denominator)) => {
            match (numerator.parse::<f64>(), denominator.parse::<f64>()) {
                (Ok(n), Ok(d)) if d != 0.0 => n / d,
                _ => {
                    debug!("Malformed fraction '{}' counted as 0.0", token);
                    0.0
                }
            }
        }
        None => token.parse::<f64>().unwrap_or(0.0),
    }
}

/// Value of a token if it reads as a quantity
fn quantity_token_value(token: &str) -> Option<f64> {
    if NUMERIC_TOKEN.is_match(token) {
        return Some(numeric_token_value(token));
    }

    if let Some(caps) = UNICODE_FRACTION_TOKEN.captures(token) {
        let whole = caps
            .name("whole")
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0);
        let fraction = caps
            .name("fraction")
            .and_then(|m| m.as_str().chars().next())
            .and_then(|c| UNICODE_FRACTIONS.iter().find(|(f, _)| *f == c))
            .map(|(_, value)| *value)
            .unwrap_or(0.0);
        return Some(whole + fraction);
    }

    None
}

/// Number of a token glued to a recognized unit ("500g", "1/2cup")
///
/// Returns the byte length of the number and its value.
fn glued_quantity(token: &str) -> Option<(usize, f64)> {
    let caps = GLUED_UNIT_TOKEN.captures(token)?;
    let unit = caps.name("unit")?.as_str();
    if !is_recognized_unit(unit) {
        return None;
    }
    let number = caps.name("number")?;
    Some((number.end(), numeric_token_value(number.as_str())))
}

/// Consume leading quantity tokens
///
/// Returns the summed quantity (if any token was consumed) and the remaining
/// text. A number glued to a recognized unit ("500g") contributes its number
/// and leaves the unit in the remainder. Trailing commas on a token ("2,")
/// are ignored.
fn extract_quantity(text: &str) -> (Option<f64>, &str) {
    let mut quantity: Option<f64> = None;
    let mut rest = text.trim_start();

    loop {
        let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = rest[..token_end].trim_end_matches(',');
        if token.is_empty() {
            break;
        }

        if let Some((number_end, value)) = glued_quantity(token) {
            trace!("Glued quantity '{}' -> {}", token, value);
            quantity = Some(quantity.unwrap_or(0.0) + value);
            rest = &rest[number_end..];
            break;
        }

        if let Some(value) = quantity_token_value(token) {
            trace!("Quantity token '{}' -> {}", token, value);
            quantity = Some(quantity.unwrap_or(0.0) + value);
            rest = rest[token_end..].trim_start();
            continue;
        }

        break;
    }

    (quantity, rest)
}

/// Clean the ingredient name: drop commas, collapse whitespace, trim
fn clean_name(raw: &str) -> String {
    raw.replace(',', "")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Parse one free-text ingredient line
///
/// ## Processing Stages
///
/// 1. **Normalization**: lowercase, trim surrounding whitespace
/// 2. **Prefix Removal**: one leading bullet (`-`, `•`, `*`)
/// 3. **Note Removal**: every `( ... )` substring, non-greedy; an unclosed `(`
///    is left in place
/// 4. **Quantity Extraction**: leading numeric, fractional and unicode
///    fraction tokens are summed, so "2 1/2" reads as 2.5
/// 5. **Unit Extraction**: a recognized unit at the start of the remainder,
///    on a word boundary
/// 6. **Name Cleanup**: commas removed, whitespace collapsed
///
/// ```text
/// "- 1 tbsp olive oil (extra virgin)"
///   stage 2 → "1 tbsp olive oil (extra virgin)"
///   stage 3 → "1 tbsp olive oil "
///   stage 4 → quantity 1.0, rest "tbsp olive oil "
///   stage 5 → unit "tbsp", rest " olive oil "
///   stage 6 → name "olive oil"
/// ```
///
/// This function never fails: malformed numbers degrade to `0.0` and blank
/// input yields an empty record.
///
/// # Examples
///
/// ```rust
/// use recipe_pantry::text_processing::parse_ingredient;
///
/// let parsed = parse_ingredient("2 1/2 cups flour");
/// assert_eq!(parsed.quantity, Some(2.5));
/// assert_eq!(parsed.unit.as_deref(), Some("cups"));
/// assert_eq!(parsed.name, "flour");
///
/// let parsed = parse_ingredient("salt");
/// assert_eq!(parsed.quantity, None);
/// assert_eq!(parsed.unit, None);
/// assert_eq!(parsed.name, "salt");
/// ```
pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    let lowered = line.to_lowercase();
    let trimmed = lowered.trim();
    if trimmed.is_empty() {
        return ParsedIngredient::default();
    }

    let without_bullet = BULLET_PATTERN.replace(trimmed, "");
    let without_notes = PARENTHETICAL_PATTERN.replace_all(&without_bullet, "");
    let text = without_notes.trim();

    let (quantity, rest) = extract_quantity(text);

    let (unit, rest) = match UNIT_PATTERN.captures(rest) {
        Some(caps) => {
            let unit = caps.name("unit").map(|m| m.as_str().to_lowercase());
            let consumed = caps.get(0).map(|m| m.end()).unwrap_or(0);
            (unit, &rest[consumed..])
        }
        None => (None, rest),
    };

    let name = clean_name(rest);

    trace!(
        "Parsed '{}' -> quantity={:?} unit={:?} name='{}'",
        line,
        quantity,
        unit,
        name
    );

    ParsedIngredient {
        quantity,
        unit,
        name,
    }
}

/// Parse a newline-separated ingredient block, skipping blank lines
pub fn parse_ingredient_block(text: &str) -> Vec<ParsedIngredient> {
    let start_time = std::time::Instant::now();
    let line_count = text.lines().count();

    debug!("Parsing ingredient block with {} lines", line_count);

    let parsed: Vec<ParsedIngredient> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_ingredient)
        .collect();

    crate::observability::record_text_processing_metrics(
        "parse_ingredient_block",
        start_time.elapsed(),
        text.len(),
        line_count,
        parsed.len(),
    );

    info!("Parsed {} ingredients from {} lines", parsed.len(), line_count);
    parsed
}

/// Rebuild a display line from a parsed ingredient
///
/// # Examples
///
/// ```rust
/// use recipe_pantry::text_processing::{format_parsed, parse_ingredient};
///
/// assert_eq!(format_parsed(&parse_ingredient("2 cups flour")), "2.0 cups flour");
/// assert_eq!(format_parsed(&parse_ingredient("3 eggs")), "3.0 eggs");
/// assert_eq!(format_parsed(&parse_ingredient("salt")), "salt");
/// ```
pub fn format_parsed(parsed: &ParsedIngredient) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if let Some(quantity) = parsed.quantity {
        parts.push(format_quantity(quantity));
        if let Some(unit) = &parsed.unit {
            parts.push(unit.clone());
        }
    }
    if !parsed.name.is_empty() {
        parts.push(parsed.name.clone());
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_token_values() {
        assert_eq!(numeric_token_value("3"), 3.0);
        assert_eq!(numeric_token_value("1.5"), 1.5);
        assert_eq!(numeric_token_value(".5"), 0.5);
        assert_eq!(numeric_token_value("3/4"), 0.75);
        assert_eq!(numeric_token_value("1/0"), 0.0);
        assert_eq!(numeric_token_value("1/x"), 0.0);
    }

    #[test]
    fn test_quantity_token_detection() {
        assert_eq!(quantity_token_value("½"), Some(0.5));
        assert_eq!(quantity_token_value("2¼"), Some(2.25));
        assert_eq!(quantity_token_value("cups"), None);
        assert_eq!(quantity_token_value("500g"), None);
    }

    #[test]
    fn test_extract_quantity_stops_at_words() {
        let (quantity, rest) = extract_quantity("2 1/2 cups flour");
        assert_eq!(quantity, Some(2.5));
        assert_eq!(rest, "cups flour");

        let (quantity, rest) = extract_quantity("fresh basil");
        assert_eq!(quantity, None);
        assert_eq!(rest, "fresh basil");
    }

    #[test]
    fn test_extract_quantity_glued_unit() {
        let (quantity, rest) = extract_quantity("500g butter");
        assert_eq!(quantity, Some(500.0));
        assert_eq!(rest, "g butter");

        let (quantity, rest) = extract_quantity("1/2cup sugar");
        assert_eq!(quantity, Some(0.5));
        assert_eq!(rest, "cup sugar");

        // Not a unit, so the token stays in the name
        let (quantity, rest) = extract_quantity("2nd batch");
        assert_eq!(quantity, None);
        assert_eq!(rest, "2nd batch");
    }

    #[test]
    fn test_extract_quantity_trailing_comma() {
        let (quantity, rest) = extract_quantity("2, eggs");
        assert_eq!(quantity, Some(2.0));
        assert_eq!(rest, "eggs");
    }

    #[test]
    fn test_glued_quantity() {
        assert_eq!(glued_quantity("500g"), Some((3, 500.0)));
        assert_eq!(glued_quantity("1/2cups"), Some((3, 0.5)));
        assert_eq!(glued_quantity("2nd"), None);
        assert_eq!(glued_quantity("1/x"), None);
    }

    #[test]
    fn test_unit_pattern_prefers_longest() {
        let caps = UNIT_PATTERN.captures("tablespoons sugar").unwrap();
        assert_eq!(&caps["unit"], "tablespoons");
        assert!(UNIT_PATTERN.captures("lemon").is_none());
        assert!(UNIT_PATTERN.captures("garlic").is_none());
    }

    #[test]
    fn test_is_recognized_unit() {
        assert!(is_recognized_unit("Cups"));
        assert!(is_recognized_unit("pkg"));
        assert!(!is_recognized_unit("handful"));
    }
}
