//! Weekly meal plan helpers.
//!
//! Meal plans are keyed by the Sunday that starts their week.

use crate::errors::AppError;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Date format accepted for week parameters
pub const WEEK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Slot of a meal within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(AppError::Validation(format!("unknown meal type '{}'", other))),
        }
    }
}

/// The Sunday on or before `date`
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use recipe_pantry::meal_plan::week_start;
///
/// let wednesday = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
/// assert_eq!(week_start(wednesday), NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    // A Sunday starts its own week. Counting `weekday() + 1` days back from a
    // Monday-based index would move Sundays to the previous week.
    let offset = date.weekday().num_days_from_sunday();
    date - Duration::days(i64::from(offset))
}

/// Week start for an optional `YYYY-MM-DD` parameter
///
/// Missing or malformed values fall back to `today`.
pub fn resolve_week_start(param: Option<&str>, today: NaiveDate) -> NaiveDate {
    let date = match param {
        Some(value) => match NaiveDate::parse_from_str(value.trim(), WEEK_DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                debug!("Invalid week_start '{}' ({}), using today", value, e);
                today
            }
        },
        None => today,
    };
    week_start(date)
}

/// The seven dates of the week starting at `start`
pub fn week_dates(start: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|day| start + Duration::days(day)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sunday_is_its_own_week_start() {
        assert_eq!(week_start(date(2024, 5, 12)), date(2024, 5, 12));
    }

    #[test]
    fn test_saturday_maps_back_six_days() {
        assert_eq!(week_start(date(2024, 5, 18)), date(2024, 5, 12));
    }

    #[test]
    fn test_week_start_across_year_boundary() {
        // 2025-01-01 is a Wednesday
        assert_eq!(week_start(date(2025, 1, 1)), date(2024, 12, 29));
    }

    #[test]
    fn test_resolve_week_start() {
        let today = date(2024, 5, 15);
        assert_eq!(resolve_week_start(Some("2024-05-20"), today), date(2024, 5, 19));
        assert_eq!(resolve_week_start(Some("not-a-date"), today), date(2024, 5, 12));
        assert_eq!(resolve_week_start(None, today), date(2024, 5, 12));
    }

    #[test]
    fn test_week_dates() {
        let dates = week_dates(date(2024, 5, 12));
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[6], date(2024, 5, 18));
    }

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!("Dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert!("brunch".parse::<MealType>().is_err());
        assert_eq!(MealType::Snack.to_string(), "snack");
    }
}
