//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RouterConfig;
use super::secret::secret_string;
use crate::domain::errors::RouterError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "LEAD_ROUTER_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RouterConfig
/// 4. Applies environment variable overrides (LEAD_ROUTER_* prefix)
/// 5. Validates the configuration, routing tables included
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsing fails, a referenced
/// environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use lead_router::config::loader::load_config;
///
/// let config = load_config("lead-router.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RouterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RouterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RouterError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn parse_config(contents: &str) -> Result<RouterConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RouterConfig = toml::from_str(&contents)
        .map_err(|e| RouterError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        RouterError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RouterError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RouterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

/// Applies environment variable overrides using the LEAD_ROUTER_* prefix
///
/// Variables follow the pattern LEAD_ROUTER_<SECTION>_<KEY>, for example
/// LEAD_ROUTER_EXPORT_BATCH_SIZE. Unparseable numeric values are ignored.
fn apply_env_overrides(config: &mut RouterConfig) {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_override("APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Export overrides
    if let Some(size) = env_override("EXPORT_BATCH_SIZE").and_then(|v| v.parse().ok()) {
        config.export.batch_size = size;
    }
    if let Some(days) = env_override("EXPORT_DATE_OFFSET_DAYS").and_then(|v| v.parse().ok()) {
        config.export.date_offset_days = days;
    }

    // Workbook overrides (only if the workbook is configured)
    if let Some(ref mut workbook) = config.workbook {
        if let Some(val) = env_override("WORKBOOK_PATH") {
            workbook.path = val;
        }
        if let Some(val) = env_override("WORKBOOK_SOURCE_SHEET") {
            workbook.source_sheet = val;
        }
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Some(val) = env_override("POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Some(max) = env_override("POSTGRESQL_MAX_CONNECTIONS").and_then(|v| v.parse().ok())
        {
            pg_config.max_connections = max;
        }
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
