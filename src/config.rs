//! # Unified Application Configuration
//!
//! This module gathers the settings used around the ingredient pipeline:
//! conversion rules loaded from JSON, observability settings and input
//! limits read from environment variables.

use crate::conversion::ConversionRules;
use crate::errors::{AppError, AppResult};
use crate::observability_config::ObservabilityConfig;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Environment variable naming an explicit conversion rules file
pub const CONVERSION_RULES_PATH_VAR: &str = "CONVERSION_RULES_CONFIG_PATH";

const FALLBACK_RULES_PATHS: [&str; 2] = [
    "config/conversion_rules.json",    // Local development path
    "../config/conversion_rules.json", // Test path
];

/// Load conversion rules from a specific JSON file
pub fn load_conversion_rules_from(path: impl AsRef<Path>) -> AppResult<ConversionRules> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::FileSystem(format!(
            "failed to read conversion rules '{}': {}",
            path.display(),
            e
        ))
    })?;
    let rules: ConversionRules = serde_json::from_str(&content)?;
    rules.validate()?;
    Ok(rules)
}

/// Load conversion rules, falling back to the built-in table
///
/// Looks at `CONVERSION_RULES_CONFIG_PATH` first, then the fallback paths.
/// Unreadable or invalid files are logged and skipped.
pub fn load_conversion_rules() -> ConversionRules {
    if let Ok(config_path) = env::var(CONVERSION_RULES_PATH_VAR) {
        info!(
            "Loading conversion rules from environment variable: {}",
            config_path
        );
        match load_conversion_rules_from(&config_path) {
            Ok(rules) => return rules,
            Err(e) => {
                warn!(
                    "Failed to load conversion rules from '{}': {}. Falling back to default paths.",
                    config_path, e
                );
            }
        }
    }

    for config_path in &FALLBACK_RULES_PATHS {
        if !Path::new(config_path).exists() {
            continue;
        }
        match load_conversion_rules_from(config_path) {
            Ok(rules) => {
                info!(
                    "Successfully loaded conversion rules from fallback path: {}",
                    config_path
                );
                return rules;
            }
            Err(e) => {
                warn!(
                    "Failed to load conversion rules at '{}': {}. Trying next path.",
                    config_path, e
                );
            }
        }
    }

    warn!("No conversion rules file found in any expected location. Using built-in rules.");
    ConversionRules::default()
}

/// Limits applied to raw input before it reaches the pipeline
#[derive(Debug, Clone)]
pub struct InputLimits {
    /// Maximum number of lines in one ingredient block
    pub max_ingredient_lines: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_ingredient_lines: 500,
        }
    }
}

impl InputLimits {
    /// Validate input limits
    pub fn validate(&self) -> AppResult<()> {
        if self.max_ingredient_lines == 0 {
            return Err(AppError::Config(
                "max_ingredient_lines must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the command-line front end
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub observability: ObservabilityConfig,
    pub limits: InputLimits,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let max_ingredient_lines = match env::var("MAX_INGREDIENT_LINES") {
            Ok(value) => value.parse::<usize>().map_err(|_| {
                AppError::Config(format!(
                    "MAX_INGREDIENT_LINES must be a positive integer, got '{}'",
                    value
                ))
            })?,
            Err(_) => InputLimits::default().max_ingredient_lines,
        };

        Ok(Self {
            observability: ObservabilityConfig::from_env(),
            limits: InputLimits {
                max_ingredient_lines,
            },
        })
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> AppResult<()> {
        self.observability.validate()?;
        self.limits.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_line_limit_rejected() {
        let config = AppConfig {
            limits: InputLimits {
                max_ingredient_lines: 0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_rules_file() {
        let result = load_conversion_rules_from("/nonexistent/conversion_rules.json");
        assert!(matches!(result, Err(AppError::FileSystem(_))));
    }
}
