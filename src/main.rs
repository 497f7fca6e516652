//! Command-line front end for the ingredient pipeline.
//!
//! Usage:
//! ```bash
//! # Parse ingredient lines (use - for stdin)
//! recipe-pantry parse ingredients.txt
//!
//! # Apply healthy substitutions to a recipe
//! recipe-pantry convert ingredients.txt instructions.txt
//!
//! # Build one grocery list from several recipes
//! recipe-pantry grocery pancakes.txt dinner.txt
//!
//! # Show the meal plan week containing a date
//! recipe-pantry week-start 2024-05-15
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipe_pantry::combiner::build_grocery_list;
use recipe_pantry::config::{self, AppConfig};
use recipe_pantry::conversion::HealthyConverter;
use recipe_pantry::errors::{error_logging, AppError};
use recipe_pantry::meal_plan::{resolve_week_start, week_dates};
use recipe_pantry::observability;
use recipe_pantry::text_processing::parse_ingredient_block;
use recipe_pantry::validation::{validate_grocery_field, validate_ingredient_block};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "recipe-pantry",
    about = "Recipe ingredient parsing and grocery list tool",
    long_about = "Parses free-text ingredient lines, applies healthy substitutions and consolidates ingredients from several recipes into a grocery list."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse ingredient lines into JSON
    Parse {
        /// Ingredient file, or - for stdin
        input: PathBuf,
    },

    /// Apply healthy substitutions to a recipe
    Convert {
        /// Ingredient file, or - for stdin
        ingredients: PathBuf,

        /// Instruction file
        instructions: Option<PathBuf>,
    },

    /// Build a grocery list, one file per recipe
    Grocery {
        /// Recipe ingredient files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the meal plan week containing a date (defaults to today)
    WeekStart {
        /// Date as YYYY-MM-DD
        date: Option<String>,
    },
}

/// Read a file, or stdin when the path is "-"
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        return Ok(buffer);
    }

    fs::read_to_string(path).map_err(|e| {
        let display = path.display().to_string();
        error_logging::log_filesystem_error(&e, "read_input", Some(&display));
        anyhow::Error::new(AppError::from(e)).context(format!("Failed to read '{}'", display))
    })
}

/// Read an ingredient block and check it against the configured limits
fn read_ingredient_block(path: &Path, config: &AppConfig) -> Result<String> {
    let text = read_input(path)?;
    validate_ingredient_block(&text, config.limits.max_ingredient_lines).map_err(|code| {
        let display = path.display().to_string();
        let error = AppError::Validation(format!("ingredient block '{}': {}", display, code));
        error_logging::log_validation_error(&error, "read_ingredient_block", "ingredients", Some(&display));
        error
    })?;
    Ok(text)
}

fn run_parse(input: &Path, config: &AppConfig) -> Result<String> {
    let text = read_ingredient_block(input, config)?;
    let parsed = parse_ingredient_block(&text);
    Ok(serde_json::to_string_pretty(&parsed)?)
}

fn run_convert(ingredients: &Path, instructions: Option<&Path>, config: &AppConfig) -> Result<String> {
    let ingredients = read_ingredient_block(ingredients, config)?;
    let instructions = match instructions {
        Some(path) => read_input(path)?,
        None => String::new(),
    };

    let rules = config::load_conversion_rules();
    let converter = HealthyConverter::new(&rules).map_err(|e| {
        error_logging::log_config_error(&e, config::CONVERSION_RULES_PATH_VAR, "run_convert");
        e
    })?;

    let converted = converter.convert_recipe(&ingredients, &instructions);
    Ok(serde_json::to_string_pretty(&converted)?)
}

fn run_grocery(files: &[PathBuf], config: &AppConfig) -> Result<String> {
    let blocks = files
        .iter()
        .map(|path| read_ingredient_block(path, config))
        .collect::<Result<Vec<String>>>()?;
    let block_refs: Vec<&str> = blocks.iter().map(String::as_str).collect();

    let list = build_grocery_list(&block_refs);
    for item in &list {
        if let Err(code) = validate_grocery_field(&item.name, item.display_quantity.as_deref()) {
            warn!(item = %item, code = code, "Grocery item exceeds storage limits");
        }
    }

    Ok(serde_json::to_string_pretty(&list)?)
}

fn run_week_start(date: Option<&str>) -> Result<String> {
    let today = chrono::Local::now().date_naive();
    let start = resolve_week_start(date, today);
    let output = serde_json::json!({
        "week_start": start,
        "dates": week_dates(start),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

fn run(command: &Command, config: &AppConfig) -> Result<String> {
    match command {
        Command::Parse { input } => run_parse(input, config),
        Command::Convert {
            ingredients,
            instructions,
        } => run_convert(ingredients, instructions.as_deref(), config),
        Command::Grocery { files } => run_grocery(files, config),
        Command::WeekStart { date } => run_week_start(date.as_deref()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env if present; real environment variables take precedence
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    observability::init_tracing_with_config(&config.observability)?;
    let metrics_handle = observability::init_metrics_with_config(&config.observability)?;

    info!("Running recipe-pantry command");
    let output = run(&cli.command, &config)?;
    println!("{}", output);

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_grocery_requires_files() {
        assert!(Cli::try_parse_from(["recipe-pantry", "grocery"]).is_err());

        let cli = Cli::try_parse_from(["recipe-pantry", "grocery", "a.txt", "b.txt"]).unwrap();
        match cli.command {
            Command::Grocery { files } => assert_eq!(files.len(), 2),
            _ => panic!("expected grocery command"),
        }
    }

    #[test]
    fn test_convert_instructions_optional() {
        let cli = Cli::try_parse_from(["recipe-pantry", "convert", "ingredients.txt"]).unwrap();
        match cli.command {
            Command::Convert { instructions, .. } => assert!(instructions.is_none()),
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_week_start_subcommand_name() {
        let cli = Cli::try_parse_from(["recipe-pantry", "week-start", "2024-05-15"]).unwrap();
        match cli.command {
            Command::WeekStart { date } => assert_eq!(date.as_deref(), Some("2024-05-15")),
            _ => panic!("expected week-start command"),
        }
    }

    #[test]
    fn test_stdin_marker_reads_path() {
        assert!(Cli::try_parse_from(["recipe-pantry", "parse", "-"]).is_ok());
    }
}
