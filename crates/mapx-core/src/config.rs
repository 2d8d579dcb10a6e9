use crate::app_config::{AppConfig, Environment};
use crate::types::Coordinates;
use crate::ConfigError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const DEFAULT_USER_AGENT: &str = "mapx/0.1 (maps-grounding)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_degrees = |var: &str, limit: f64| -> Result<Option<f64>, ConfigError> {
        let Some(raw) = optional(var) else {
            return Ok(None);
        };
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if !value.is_finite() || value.abs() > limit {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be within [-{limit}, {limit}], got {value}"),
            });
        }
        Ok(Some(value))
    };

    let env = parse_environment(&or_default("MAPX_ENV", "development"));
    let log_level = or_default("MAPX_LOG_LEVEL", "info");
    let gemini_base_url = or_default("MAPX_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
    let user_agent = or_default("MAPX_USER_AGENT", DEFAULT_USER_AGENT);

    let latitude = parse_degrees("MAPX_LATITUDE", 90.0)?;
    let longitude = parse_degrees("MAPX_LONGITUDE", 180.0)?;
    let fixed_location = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        (None, None) => None,
        (Some(_), None) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "MAPX_LONGITUDE".to_string(),
                reason: "required when MAPX_LATITUDE is set".to_string(),
            });
        }
        (None, Some(_)) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "MAPX_LATITUDE".to_string(),
                reason: "required when MAPX_LONGITUDE is set".to_string(),
            });
        }
    };

    let geolocation_url = optional("MAPX_GEOLOCATION_URL");
    let location_timeout_ms = parse_u64("MAPX_LOCATION_TIMEOUT_MS", "10000")?;

    Ok(AppConfig {
        env,
        log_level,
        gemini_base_url,
        user_agent,
        fixed_location,
        geolocation_url,
        location_timeout_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
