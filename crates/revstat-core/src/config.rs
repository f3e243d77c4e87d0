use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let paapi_access_key_id = require("REVSTAT_PAAPI_ACCESS_KEY_ID")?;
    let paapi_secret_key = require("REVSTAT_PAAPI_SECRET_KEY")?;
    let paapi_associate_tag = lookup("REVSTAT_PAAPI_ASSOCIATE_TAG").ok();
    let paapi_endpoint = or_default(
        "REVSTAT_PAAPI_ENDPOINT",
        "https://webservices.amazon.com/onca/xml",
    );

    let api_delay_secs = parse_u64("REVSTAT_API_DELAY_SECS", "2")?;
    let retry_delay_secs = parse_u64("REVSTAT_RETRY_DELAY_SECS", "5")?;
    let request_timeout_secs = parse_u64("REVSTAT_REQUEST_TIMEOUT_SECS", "10")?;
    let max_attempts = parse_u32("REVSTAT_MAX_ATTEMPTS", "10")?;
    let user_agent = or_default("REVSTAT_USER_AGENT", "revstat/0.1 (review-stats)");
    let log_level = or_default("REVSTAT_LOG_LEVEL", "info");

    Ok(AppConfig {
        paapi_access_key_id,
        paapi_secret_key,
        paapi_associate_tag,
        paapi_endpoint,
        api_delay_secs,
        retry_delay_secs,
        request_timeout_secs,
        max_attempts,
        user_agent,
        log_level,
    })
}
