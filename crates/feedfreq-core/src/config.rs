use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Smallest top-N a caller may request.
pub const MIN_TOP_N: usize = 10;

/// Largest top-N a caller may request.
pub const MAX_TOP_N: usize = 1000;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; feedfreq/0.1; RSS word analyzer)";

/// Clamp a requested top-N into `[MIN_TOP_N, MAX_TOP_N]`.
#[must_use]
pub fn clamp_top_n(requested: usize) -> usize {
    requested.clamp(MIN_TOP_N, MAX_TOP_N)
}

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
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let require_positive = |var: &str, is_zero: bool| -> Result<(), ConfigError> {
        if is_zero {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    };

    let env = parse_environment(&or_default("FEEDFREQ_ENV", "development"))?;
    let log_level = or_default("FEEDFREQ_LOG_LEVEL", "info");
    let settings_path = PathBuf::from(or_default("FEEDFREQ_SETTINGS_PATH", "./settings.json"));
    let user_agent = or_default("FEEDFREQ_USER_AGENT", DEFAULT_USER_AGENT);

    let fetch_timeout_secs = parse_u64("FEEDFREQ_FETCH_TIMEOUT_SECS", "30")?;
    require_positive("FEEDFREQ_FETCH_TIMEOUT_SECS", fetch_timeout_secs == 0)?;

    let max_concurrent_feeds = parse_usize("FEEDFREQ_MAX_CONCURRENT_FEEDS", "1")?;
    require_positive("FEEDFREQ_MAX_CONCURRENT_FEEDS", max_concurrent_feeds == 0)?;

    let max_articles_per_feed = parse_usize("FEEDFREQ_MAX_ARTICLES_PER_FEED", "25")?;
    require_positive("FEEDFREQ_MAX_ARTICLES_PER_FEED", max_articles_per_feed == 0)?;

    let top_n = clamp_top_n(parse_usize("FEEDFREQ_TOP_N", "100")?);

    Ok(AppConfig {
        env,
        log_level,
        settings_path,
        fetch_timeout_secs,
        user_agent,
        max_concurrent_feeds,
        max_articles_per_feed,
        top_n,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FEEDFREQ_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
