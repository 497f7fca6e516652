//! Ingredient categorization for grocery list grouping.
//!
//! Maps ingredient names to store-aisle categories by keyword containment.
//! Categories are tried in aisle order and the first match wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-aisle category of a grocery item
///
/// Variant order is the aisle order used when sorting a grocery list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Pantry,
    Frozen,
    Beverages,
    Other,
}

impl Category {
    /// All categories in aisle order
    pub const ALL: [Category; 7] = [
        Category::Produce,
        Category::Dairy,
        Category::Meat,
        Category::Pantry,
        Category::Frozen,
        Category::Beverages,
        Category::Other,
    ];

    /// Lowercase identifier, as stored by the web layer
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Pantry => "pantry",
            Category::Frozen => "frozen",
            Category::Beverages => "beverages",
            Category::Other => "other",
        }
    }

    /// Keywords that place an ingredient in this category
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Produce => &[
                "apple", "banana", "orange", "lettuce", "tomato", "onion", "garlic", "carrot",
                "potato", "celery", "cucumber", "pepper", "lemon", "lime", "spinach", "kale",
                "broccoli", "cauliflower", "mushroom", "zucchini", "squash", "pumpkin", "ginger",
                "herbs", "parsley", "cilantro", "basil", "mint", "thyme", "rosemary", "sage",
            ],
            Category::Dairy => &[
                "milk",
                "cheese",
                "yogurt",
                "butter",
                "cream",
                "sour cream",
                "cottage cheese",
                "cream cheese",
                "mozzarella",
                "cheddar",
                "parmesan",
                "ricotta",
                "buttermilk",
                "half and half",
                "whipping cream",
                "heavy cream",
            ],
            Category::Meat => &[
                "chicken",
                "beef",
                "pork",
                "turkey",
                "lamb",
                "fish",
                "salmon",
                "tuna",
                "shrimp",
                "bacon",
                "sausage",
                "ground beef",
                "ground turkey",
                "ham",
                "steak",
                "ribs",
                "duck",
                "veal",
            ],
            Category::Pantry => &[
                "flour",
                "sugar",
                "salt",
                "pepper",
                "oil",
                "vinegar",
                "rice",
                "pasta",
                "bread",
                "cereal",
                "baking powder",
                "baking soda",
                "vanilla",
                "cinnamon",
                "oregano",
                "cumin",
                "paprika",
                "nutmeg",
                "honey",
                "maple syrup",
                "soy sauce",
                "ketchup",
                "mustard",
                "mayonnaise",
            ],
            Category::Frozen => &[
                "ice cream",
                "frozen vegetables",
                "frozen fruit",
                "frozen pizza",
                "frozen dinner",
                "ice",
                "frozen peas",
                "frozen corn",
                "frozen berries",
            ],
            Category::Beverages => &[
                "water",
                "coffee",
                "tea",
                "juice",
                "soda",
                "wine",
                "beer",
                "sparkling water",
                "coconut water",
                "almond milk",
                "soy milk",
            ],
            Category::Other => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::errors::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == lower)
            .ok_or_else(|| crate::errors::AppError::Validation(format!("unknown category '{}'", s)))
    }
}

/// Categorize an ingredient by name
///
/// A category matches when one of its keywords is contained in the name or
/// the name is contained in the keyword, so both "red onion" and "tomatoes"
/// style variants resolve.
///
/// # Examples
///
/// ```rust
/// use recipe_pantry::categorizer::{categorize, Category};
///
/// assert_eq!(categorize("Red Onion"), Category::Produce);
/// assert_eq!(categorize("whole milk"), Category::Dairy);
/// assert_eq!(categorize("xyzfoobar"), Category::Other);
/// ```
pub fn categorize(name: &str) -> Category {
    let lower = name.trim().to_lowercase();
    if lower.is_empty() {
        return Category::Other;
    }

    Category::ALL
        .iter()
        .copied()
        .find(|category| {
            category
                .keywords()
                .iter()
                .any(|keyword| lower.contains(keyword) || keyword.contains(lower.as_str()))
        })
        .unwrap_or(Category::Other)
}
