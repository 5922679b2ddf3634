//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SanitizerConfig;
use crate::domain::errors::SanitizerError;
use crate::domain::result::Result;
use crate::sanitizer::Mode;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "DOSSIER_SANITIZER_";

static ENV_VAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var regex is valid")
});

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SanitizerConfig
/// 4. Applies environment variable overrides (DOSSIER_SANITIZER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use dossier_sanitizer::config::loader::load_config;
///
/// let config = load_config("dossier-sanitizer.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SanitizerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SanitizerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SanitizerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SanitizerConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        SanitizerError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let processed = ENV_VAR_REGEX.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
    }

    if !missing_vars.is_empty() {
        return Err(SanitizerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the DOSSIER_SANITIZER_* prefix
///
/// Variables follow the pattern `DOSSIER_SANITIZER_<SECTION>_<KEY>`, for
/// example `DOSSIER_SANITIZER_SANITIZER_MODE`.
fn apply_env_overrides(config: &mut SanitizerConfig) -> Result<()> {
    let var = |key: &str| std::env::var(format!("{ENV_PREFIX}{key}")).ok();

    // Sanitizer overrides
    if let Some(val) = var("SANITIZER_MODE") {
        config.sanitizer.mode = val.parse::<Mode>()?;
    }
    if let Some(val) = var("SANITIZER_MAPPING_REPORT") {
        config.sanitizer.mapping_report = Some(PathBuf::from(val));
    }

    // Logging overrides
    if let Some(val) = var("LOGGING_LOG_LEVEL") {
        config.logging.log_level = val;
    }
    if let Some(val) = var("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    // Report overrides
    if let Some(val) = var("REPORT_PRETTY") {
        config.report.pretty = val.parse().unwrap_or(false);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("DOSSIER_LOADER_TEST_VAR", "/tmp/report.json");
        let input = "mapping_report = \"${DOSSIER_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "mapping_report = \"/tmp/report.json\"");
        std::env::remove_var("DOSSIER_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("DOSSIER_LOADER_MISSING_VAR");
        let input = "mapping_report = \"${DOSSIER_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# path = \"${DOSSIER_LOADER_NEVER_SET}\"\nmode = \"minimal\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(SanitizerError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[sanitizer]
mode = "moderate"
mapping_report = "mapping.json"

[logging]
log_level = "debug"

[report]
pretty = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.sanitizer.mode, Mode::Moderate);
        assert_eq!(
            config.sanitizer.mapping_report.as_deref(),
            Some(Path::new("mapping.json"))
        );
        assert_eq!(config.logging.log_level, "debug");
        assert!(config.report.pretty);
    }

    #[test]
    fn test_load_config_invalid_mode() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[sanitizer]\nmode = \"paranoid\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }
}
