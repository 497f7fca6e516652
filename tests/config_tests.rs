#[cfg(test)]
mod tests {
    use recipe_pantry::config::{
        load_conversion_rules, load_conversion_rules_from, AppConfig, CONVERSION_RULES_PATH_VAR,
    };
    use recipe_pantry::conversion::{ConversionRules, Substitution};
    use recipe_pantry::errors::AppError;
    use recipe_pantry::observability_config::ObservabilityConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn custom_rules() -> ConversionRules {
        ConversionRules {
            substitutions: vec![Substitution::new("lard", "olive oil")],
            halve_keywords: vec!["olive oil".to_string()],
        }
    }

    #[test]
    fn test_shipped_rules_match_builtin() {
        let rules = load_conversion_rules_from("config/conversion_rules.json").unwrap();
        assert_eq!(rules, ConversionRules::default());
    }

    #[test]
    fn test_load_rules_from_file() {
        let json = serde_json::to_string(&custom_rules()).unwrap();
        let file = write_temp(&json);

        let rules = load_conversion_rules_from(file.path()).unwrap();
        assert_eq!(rules, custom_rules());
    }

    #[test]
    fn test_malformed_rules_file() {
        let file = write_temp("{ not json");
        let result = load_conversion_rules_from(file.path());
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let file = write_temp(r#"{"substitutions": [], "halve_keywords": ["salt"]}"#);
        let result = load_conversion_rules_from(file.path());
        assert!(matches!(result, Err(AppError::Config(_))));

        let file = write_temp(
            r#"{"substitutions": [{"from": "", "to": "honey"}], "halve_keywords": []}"#,
        );
        let result = load_conversion_rules_from(file.path());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    // Every environment variable lookup lives in this one test so parallel
    // tests never observe each other's values.
    #[test]
    fn test_environment_overrides() {
        let json = serde_json::to_string(&custom_rules()).unwrap();
        let file = write_temp(&json);

        std::env::set_var(CONVERSION_RULES_PATH_VAR, file.path());
        assert_eq!(load_conversion_rules(), custom_rules());

        std::env::set_var(CONVERSION_RULES_PATH_VAR, "/nonexistent/rules.json");
        assert_eq!(load_conversion_rules(), ConversionRules::default());
        std::env::remove_var(CONVERSION_RULES_PATH_VAR);

        std::env::set_var("MAX_INGREDIENT_LINES", "25");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.limits.max_ingredient_lines, 25);

        std::env::set_var("MAX_INGREDIENT_LINES", "lots");
        assert!(matches!(AppConfig::from_env(), Err(AppError::Config(_))));

        std::env::set_var("MAX_INGREDIENT_LINES", "0");
        let config = AppConfig::from_env().unwrap();
        assert!(config.validate().is_err());
        std::env::remove_var("MAX_INGREDIENT_LINES");
    }

    #[test]
    fn test_observability_config_validation() {
        let config = ObservabilityConfig {
            log_format: "xml".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ObservabilityConfig {
            environment: "production".to_string(),
            log_format: "json".to_string(),
            log_level: "WARN".to_string(),
            enable_metrics_export: true,
        };
        assert!(config.validate().is_ok());
        assert!(!config.is_development());
    }
}
