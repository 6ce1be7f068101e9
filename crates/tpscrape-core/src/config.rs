use crate::app_config::{AppConfig, MarkupVersion};
use crate::ConfigError;

/// Browser-like identity sent with every request. The site serves bot
/// challenges to obvious scraper user agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:102.0) Gecko/20100101 Firefox/102.0";

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("TPSCRAPE_LOG_LEVEL", "info");
    let user_agent = or_default("TPSCRAPE_USER_AGENT", DEFAULT_USER_AGENT);
    let markup_version = or_default("TPSCRAPE_MARKUP_VERSION", "current")
        .parse::<MarkupVersion>()
        .map_err(|reason| invalid("TPSCRAPE_MARKUP_VERSION", reason))?;
    let site_domain = or_default("TPSCRAPE_SITE_DOMAIN", "trustpilot.com");
    if site_domain.trim().is_empty() {
        return Err(invalid(
            "TPSCRAPE_SITE_DOMAIN",
            "must be non-empty".to_string(),
        ));
    }
    let default_country = or_default("TPSCRAPE_DEFAULT_COUNTRY", "united states");

    let max_retries = parse_u32("TPSCRAPE_MAX_RETRIES", "0")?;
    let retry_backoff_base_ms = parse_u64("TPSCRAPE_RETRY_BACKOFF_BASE_MS", "1000")?;
    let request_timeout_secs = match lookup("TPSCRAPE_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("TPSCRAPE_REQUEST_TIMEOUT_SECS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    Ok(AppConfig {
        log_level,
        user_agent,
        markup_version,
        site_domain,
        default_country,
        max_retries,
        retry_backoff_base_ms,
        request_timeout_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
