//! # Healthy Recipe Conversion
//!
//! Rewrites a recipe with healthier ingredients: unhealthy terms are replaced
//! by their healthy counterparts in ingredient names and instruction text, and
//! quantities of ingredients written as sweeteners, salt or fats are halved.
//!
//! Replacement is whole-word and case-insensitive. All terms are matched in a
//! single pass with the longest term tried first, so "brown sugar" wins over
//! "sugar" and a replacement is never substituted again.

use crate::errors::{AppError, AppResult};
use crate::text_processing::{format_parsed, parse_ingredient, ParsedIngredient};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// One unhealthy → healthy replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub from: String,
    pub to: String,
}

impl Substitution {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Substitution table and halve-quantity keywords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRules {
    pub substitutions: Vec<Substitution>,
    pub halve_keywords: Vec<String>,
}

impl Default for ConversionRules {
    fn default() -> Self {
        let substitutions = [
            ("butter", "olive oil"),
            ("margarine", "olive oil"),
            ("vegetable oil", "olive oil"),
            ("canola oil", "olive oil"),
            ("white flour", "whole wheat flour"),
            ("all-purpose flour", "whole wheat flour"),
            ("sugar", "honey"),
            ("brown sugar", "coconut sugar"),
            ("white rice", "brown rice"),
            ("white bread", "whole grain bread"),
            ("bread crumbs", "whole grain bread crumbs"),
            ("white pasta", "whole wheat pasta"),
            ("pasta", "whole wheat pasta"),
            ("heavy cream", "greek yogurt"),
            ("sour cream", "greek yogurt"),
            ("mayonnaise", "greek yogurt"),
            ("whole milk", "almond milk"),
            ("milk", "almond milk"),
            ("cream cheese", "low-fat cream cheese"),
            ("ground beef", "lean ground turkey"),
            ("beef", "lean beef"),
            ("bacon", "turkey bacon"),
            ("salt", "sea salt"),
            ("chocolate chips", "dark chocolate chips"),
            ("white chocolate", "dark chocolate"),
            ("rice", "quinoa"),
            ("breadcrumbs", "ground oats"),
            ("corn syrup", "maple syrup"),
        ];

        let halve_keywords = [
            "salt",
            "sugar",
            "honey",
            "maple syrup",
            "coconut sugar",
            "olive oil",
        ];

        Self {
            substitutions: substitutions
                .iter()
                .map(|(from, to)| Substitution::new(from, to))
                .collect(),
            halve_keywords: halve_keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl ConversionRules {
    /// Validate conversion rules
    pub fn validate(&self) -> AppResult<()> {
        if self.substitutions.is_empty() {
            return Err(AppError::Config("substitutions cannot be empty".to_string()));
        }

        let validate_term = |term: &str, field: &str, index: usize| -> AppResult<()> {
            if term.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "{}[{}] cannot be empty",
                    field, index
                )));
            }
            if term.chars().any(|c| c.is_control()) {
                return Err(AppError::Config(format!(
                    "{}[{}] '{}' contains control characters",
                    field, index, term
                )));
            }
            Ok(())
        };

        for (i, substitution) in self.substitutions.iter().enumerate() {
            validate_term(&substitution.from, "substitutions.from", i)?;
            validate_term(&substitution.to, "substitutions.to", i)?;
        }
        for (i, keyword) in self.halve_keywords.iter().enumerate() {
            validate_term(keyword, "halve_keywords", i)?;
        }

        Ok(())
    }
}

/// A recipe after healthy conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedRecipe {
    /// Newline-joined reconstructed ingredient lines
    pub ingredients: String,
    /// Newline-joined instruction lines with substitutions applied
    pub instructions: String,
}

/// Whole-word, case-insensitive alternation of terms, longest first
fn build_term_pattern<'a>(terms: impl Iterator<Item = &'a str>) -> AppResult<Option<Regex>> {
    let mut sorted: Vec<String> = terms.map(|t| t.trim().to_lowercase()).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    sorted.dedup();

    if sorted.is_empty() {
        return Ok(None);
    }

    let escaped: Vec<String> = sorted.iter().map(|t| regex::escape(t)).collect();
    let pattern = format!(r"(?i)\b(?:{})\b", escaped.join("|"));
    Regex::new(&pattern)
        .map(Some)
        .map_err(|e| AppError::Config(format!("invalid conversion term pattern: {}", e)))
}

/// Applies a set of conversion rules to ingredients and instructions
#[derive(Debug, Clone)]
pub struct HealthyConverter {
    replacements: HashMap<String, String>,
    substitution_pattern: Option<Regex>,
    halve_pattern: Option<Regex>,
}

impl HealthyConverter {
    /// Compile a converter from validated rules
    pub fn new(rules: &ConversionRules) -> AppResult<Self> {
        rules.validate()?;

        // First entry wins when a term is listed twice
        let mut replacements = HashMap::new();
        for substitution in &rules.substitutions {
            replacements
                .entry(substitution.from.trim().to_lowercase())
                .or_insert_with(|| substitution.to.clone());
        }

        let substitution_pattern =
            build_term_pattern(rules.substitutions.iter().map(|s| s.from.as_str()))?;
        let halve_pattern = build_term_pattern(rules.halve_keywords.iter().map(|k| k.as_str()))?;

        debug!(
            substitutions = replacements.len(),
            halve_keywords = rules.halve_keywords.len(),
            "Compiled healthy converter"
        );

        Ok(Self {
            replacements,
            substitution_pattern,
            halve_pattern,
        })
    }

    fn substitute(&self, text: &str) -> String {
        match &self.substitution_pattern {
            Some(pattern) => pattern
                .replace_all(text, |caps: &Captures| {
                    let matched = &caps[0];
                    self.replacements
                        .get(&matched.to_lowercase())
                        .cloned()
                        .unwrap_or_else(|| matched.to_string())
                })
                .into_owned(),
            None => text.to_string(),
        }
    }

    fn should_halve(&self, name: &str) -> bool {
        self.halve_pattern
            .as_ref()
            .map(|pattern| pattern.is_match(name))
            .unwrap_or(false)
    }

    /// Convert one parsed ingredient
    ///
    /// The quantity is halved when the name as written contains a halve
    /// keyword. A keyword introduced by substitution ("butter" becoming
    /// "olive oil") does not halve.
    pub fn convert_ingredient(&self, parsed: &ParsedIngredient) -> ParsedIngredient {
        let name = self.substitute(&parsed.name);
        let halve = self.should_halve(&parsed.name);
        let quantity = parsed
            .quantity
            .map(|quantity| if halve { quantity / 2.0 } else { quantity });

        ParsedIngredient {
            quantity,
            unit: parsed.unit.clone(),
            name,
        }
    }

    /// Apply substitutions to one instruction line
    pub fn convert_instruction(&self, instruction: &str) -> String {
        self.substitute(instruction)
    }

    /// Convert a whole recipe; blank lines are dropped on both sides
    pub fn convert_recipe(&self, ingredients: &str, instructions: &str) -> ConvertedRecipe {
        let mut substituted = 0;
        let mut halved = 0;

        let converted_ingredients: Vec<String> = ingredients
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let parsed = parse_ingredient(line);
                let converted = self.convert_ingredient(&parsed);
                if converted.name != parsed.name {
                    substituted += 1;
                }
                if converted.quantity != parsed.quantity {
                    halved += 1;
                }
                format_parsed(&converted)
            })
            .collect();

        let converted_instructions: Vec<String> = instructions
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.convert_instruction(line))
            .collect();

        crate::observability::record_conversion_metrics(
            substituted,
            halved,
            converted_instructions.len(),
        );

        info!(
            ingredients = converted_ingredients.len(),
            instructions = converted_instructions.len(),
            substituted,
            halved,
            "Converted recipe"
        );

        ConvertedRecipe {
            ingredients: converted_ingredients.join("\n"),
            instructions: converted_instructions.join("\n"),
        }
    }
}

lazy_static! {
    static ref DEFAULT_CONVERTER: HealthyConverter = HealthyConverter::new(&ConversionRules::default())
        .expect("Default conversion rules should be valid");
}

/// Convert a recipe with the built-in rules
///
/// # Examples
///
/// ```rust
/// use recipe_pantry::conversion::convert_recipe;
///
/// let converted = convert_recipe("2 cups sugar\n1 cup butter", "Cream the Butter and sugar.");
/// assert_eq!(converted.ingredients, "1.0 cups honey\n1.0 cup olive oil");
/// assert_eq!(converted.instructions, "Cream the olive oil and honey.");
/// ```
pub fn convert_recipe(ingredients: &str, instructions: &str) -> ConvertedRecipe {
    DEFAULT_CONVERTER.convert_recipe(ingredients, instructions)
}
