//! Validation module for raw recipe input
//!
//! The ingredient pipeline accepts any text; these guards run in front of it
//! to reject input the web layer could not store:
//!
//! - Recipe titles
//! - Ingredient blocks
//! - Grocery item fields

/// Maximum stored length of a recipe title or grocery item name
pub const MAX_NAME_LENGTH: usize = 255;
/// Maximum stored length of a grocery item quantity
pub const MAX_QUANTITY_LENGTH: usize = 50;

/// Validates a recipe title
///
/// # Returns
/// * `Ok(&str)` - The trimmed title if valid
/// * `Err(&str)` - Error type: "empty" or "too_long"
///
/// # Examples
/// ```
/// use recipe_pantry::validation::validate_recipe_title;
///
/// assert_eq!(validate_recipe_title("  Banana Bread "), Ok("Banana Bread"));
/// assert_eq!(validate_recipe_title(""), Err("empty"));
/// assert_eq!(validate_recipe_title(&"a".repeat(256)), Err("too_long"));
/// ```
pub fn validate_recipe_title(title: &str) -> Result<&str, &'static str> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err("too_long");
    }

    Ok(trimmed)
}

/// Validates an ingredient block before parsing
///
/// # Returns
/// * `Ok(usize)` - Number of non-blank lines
/// * `Err(&str)` - Error type: "empty" or "too_many_lines"
///
/// # Examples
/// ```
/// use recipe_pantry::validation::validate_ingredient_block;
///
/// assert_eq!(validate_ingredient_block("2 cups flour\n\n1 egg", 10), Ok(2));
/// assert_eq!(validate_ingredient_block(" \n ", 10), Err("empty"));
/// assert_eq!(validate_ingredient_block("a\nb\nc", 2), Err("too_many_lines"));
/// ```
pub fn validate_ingredient_block(text: &str, max_lines: usize) -> Result<usize, &'static str> {
    let line_count = text.lines().filter(|line| !line.trim().is_empty()).count();

    if line_count == 0 {
        return Err("empty");
    }

    if line_count > max_lines {
        return Err("too_many_lines");
    }

    Ok(line_count)
}

/// Validates the name and quantity of a grocery item
///
/// # Returns
/// * `Ok(())` - Both fields fit
/// * `Err(&str)` - Error type: "name-empty", "name-too-long" or "quantity-too-long"
pub fn validate_grocery_field(name: &str, quantity: Option<&str>) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name-empty");
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err("name-too-long");
    }

    if let Some(quantity) = quantity {
        if quantity.chars().count() > MAX_QUANTITY_LENGTH {
            return Err("quantity-too-long");
        }
    }

    Ok(())
}
