use crate::app_config::{AppConfig, Environment};
use crate::filter::HourField;
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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_hour = |var: &str, default: &str, field: HourField| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u8>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        let range = field.range();
        if range.contains(value) {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("{value} is outside {}..={}", range.min, range.max),
            })
        }
    };

    let backend_url = require("JAM_BACKEND_URL")?;
    if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "JAM_BACKEND_URL".to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }

    let env = parse_environment(&or_default("JAM_ENV", "development"))?;
    let log_level = or_default("JAM_LOG_LEVEL", "info");
    let user_agent = or_default("JAM_USER_AGENT", "jamtogether/0.1 (room-finder)");
    let catalog_path = lookup("JAM_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let loading_interval_ms = parse_u64("JAM_LOADING_INTERVAL_MS", "2000")?;
    if loading_interval_ms == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "JAM_LOADING_INTERVAL_MS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let default_start_hour = parse_hour("JAM_DEFAULT_START_HOUR", "16", HourField::Start)?;
    let default_end_hour = parse_hour("JAM_DEFAULT_END_HOUR", "22", HourField::End)?;
    let default_min_hours = parse_hour("JAM_DEFAULT_MIN_HOURS", "2", HourField::MinDuration)?;

    Ok(AppConfig {
        backend_url,
        env,
        log_level,
        user_agent,
        catalog_path,
        loading_interval_ms,
        default_start_hour,
        default_end_hour,
        default_min_hours,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "JAM_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
