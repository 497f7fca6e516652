//! Observability module for logging and metrics setup.
//!
//! This module provides:
//! - Structured logging with configurable levels and formats
//! - Spans for pipeline operations
//! - Metrics recording for ingredient parsing and grocery aggregation
//! - An optional Prometheus recorder for the command-line front end

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::prelude::*;

use crate::observability_config::ObservabilityConfig;

/// Initialize structured logging with tracing and configuration
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("recipe_pantry={}", config.log_level).parse()?);

    if config.is_development() || config.log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true),
            )
            .try_init()?;
    }

    tracing::info!(
        environment = %config.environment,
        log_level = %config.log_level,
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Install the Prometheus recorder when metrics export is enabled
pub fn init_metrics_with_config(config: &ObservabilityConfig) -> Result<Option<PrometheusHandle>> {
    if !config.enable_metrics_export {
        tracing::debug!("Metrics export disabled");
        return Ok(None);
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::info!("Metrics collection initialized");
    Ok(Some(handle))
}

/// Create a span for pipeline operations
pub fn pipeline_span(operation: &str) -> tracing::Span {
    tracing::info_span!(
        "pipeline_operation",
        operation = operation,
        component = "ingredients"
    )
}

/// Record text processing performance metrics
pub fn record_text_processing_metrics(
    operation: &str,
    duration: std::time::Duration,
    text_length: usize,
    line_count: usize,
    ingredients_found: usize,
) {
    let operation = operation.to_string();
    metrics::counter!("text_processing_operations_total", "operation" => operation.clone())
        .increment(1);
    metrics::histogram!("text_processing_duration_seconds", "operation" => operation.clone())
        .record(duration.as_secs_f64());
    metrics::histogram!("text_processing_input_length", "operation" => operation.clone())
        .record(text_length as f64);
    metrics::histogram!("text_processing_line_count", "operation" => operation.clone())
        .record(line_count as f64);
    metrics::histogram!("text_processing_ingredients_found", "operation" => operation)
        .record(ingredients_found as f64);
}

/// Record grocery list aggregation metrics
pub fn record_grocery_metrics(
    recipe_count: usize,
    ingredient_count: usize,
    item_count: usize,
    duration: std::time::Duration,
) {
    metrics::counter!("grocery_lists_built_total").increment(1);
    metrics::histogram!("grocery_list_recipes").record(recipe_count as f64);
    metrics::histogram!("grocery_list_ingredients").record(ingredient_count as f64);
    metrics::histogram!("grocery_list_items").record(item_count as f64);
    metrics::histogram!("grocery_list_duration_seconds").record(duration.as_secs_f64());

    // Share of parsed ingredients merged into an existing item
    let merge_ratio = if ingredient_count > 0 {
        1.0 - item_count as f64 / ingredient_count as f64
    } else {
        0.0
    };
    metrics::gauge!("grocery_list_merge_ratio").set(merge_ratio);
}

/// Record a healthy recipe conversion
pub fn record_conversion_metrics(substituted: usize, halved: usize, instruction_lines: usize) {
    metrics::counter!("recipe_conversions_total").increment(1);
    metrics::counter!("ingredient_substitutions_total").increment(substituted as u64);
    metrics::counter!("ingredient_quantities_halved_total").increment(halved as u64);
    metrics::histogram!("recipe_conversion_instruction_lines").record(instruction_lines as f64);
}
