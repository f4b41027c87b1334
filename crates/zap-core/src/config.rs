use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset ones fall back to [`AppConfig::default`].
/// Parsing is decoupled from the real environment so it can be tested with a
/// pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        let raw = or_default(var, &default.to_string());
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        let raw = or_default(var, &default.to_string());
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let base_url = or_default("ZAP_BASE_URL", &defaults.base_url)
        .trim_end_matches('/')
        .to_string();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "ZAP_BASE_URL".to_string(),
            reason: format!("\"{base_url}\" is not an http(s) URL"),
        });
    }

    let log_level = or_default("ZAP_LOG_LEVEL", &defaults.log_level);
    let quiet = parse_bool("ZAP_QUIET", &or_default("ZAP_QUIET", "false"))?;
    let user_agent = or_default("ZAP_USER_AGENT", &defaults.user_agent);

    let request_timeout_secs = parse_u64("ZAP_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
    let max_retries = parse_u32("ZAP_MAX_RETRIES", defaults.max_retries)?;
    let retry_backoff_base_secs =
        parse_u64("ZAP_RETRY_BACKOFF_BASE_SECS", defaults.retry_backoff_base_secs)?;
    let search_window_days = parse_u32("ZAP_SEARCH_WINDOW_DAYS", defaults.search_window_days)?;

    Ok(AppConfig {
        base_url,
        log_level,
        quiet,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        search_window_days,
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("\"{other}\" is not a boolean"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
