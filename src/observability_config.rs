//! # Observability Configuration
//!
//! Environment-specific settings for logging and metrics.

use crate::errors::{AppError, AppResult};
use std::env;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Observability configuration for different environments
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Environment name (development, staging, production)
    pub environment: String,
    /// Log level for the crate's own targets
    pub log_level: String,
    /// Log output format ("pretty" or "json")
    pub log_format: String,
    /// Whether the CLI installs a Prometheus recorder and prints its snapshot
    pub enable_metrics_export: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            enable_metrics_export: false,
        }
    }
}

impl ObservabilityConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            enable_metrics_export: env::var("ENABLE_METRICS_EXPORT")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        }
    }

    /// Whether running in a development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Validate the configuration values
    pub fn validate(&self) -> AppResult<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "log_level '{}' must be one of {:?}",
                self.log_level, VALID_LOG_LEVELS
            )));
        }

        if self.log_format != "pretty" && self.log_format != "json" {
            return Err(AppError::Config(format!(
                "log_format '{}' must be 'pretty' or 'json'",
                self.log_format
            )));
        }

        if self.environment.trim().is_empty() {
            return Err(AppError::Config("environment cannot be empty".to_string()));
        }

        Ok(())
    }
}
