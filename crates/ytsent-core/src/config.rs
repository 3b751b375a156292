use std::path::PathBuf;
use std::str::FromStr;

use crate::aggregate::{LikesCoefficient, MissingLikesPolicy};
use crate::app_config::AppConfig;
use crate::types::LabelSet;
use crate::ConfigError;

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

    let youtube_api_key = lookup("YOUTUBE_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let youtube_base_url = or_default(
        "YTSENT_YOUTUBE_BASE_URL",
        "https://www.googleapis.com/youtube/v3/",
    );
    let classifier_url = or_default("YTSENT_CLASSIFIER_URL", "http://localhost:8080");
    let label_set: LabelSet = parse_var(&or_default, "YTSENT_LABEL_SET", "three-class")?;

    let raw_coefficient: f64 = parse_var(&or_default, "YTSENT_LIKES_COEFFICIENT", "0.5")?;
    let likes_coefficient =
        LikesCoefficient::new(raw_coefficient).map_err(|e| ConfigError::InvalidEnvVar {
            var: "YTSENT_LIKES_COEFFICIENT".to_string(),
            reason: e.to_string(),
        })?;
    let missing_likes: MissingLikesPolicy =
        parse_var(&or_default, "YTSENT_MISSING_LIKES", "zero")?;

    let output_dir = PathBuf::from(or_default("YTSENT_OUTPUT_DIR", "./output"));
    let log_level = or_default("YTSENT_LOG_LEVEL", "info");

    let request_timeout_secs = parse_var(&or_default, "YTSENT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("YTSENT_USER_AGENT", "ytsent/0.1 (comment-sentiment)");
    let max_retries = parse_var(&or_default, "YTSENT_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_var(&or_default, "YTSENT_RETRY_BACKOFF_BASE_MS", "1000")?;
    let classifier_batch_size: usize =
        parse_var(&or_default, "YTSENT_CLASSIFIER_BATCH_SIZE", "32")?;
    if classifier_batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "YTSENT_CLASSIFIER_BATCH_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let max_comments = parse_var(&or_default, "YTSENT_MAX_COMMENTS", "100")?;

    Ok(AppConfig {
        youtube_api_key,
        youtube_base_url,
        classifier_url,
        label_set,
        likes_coefficient,
        missing_likes,
        output_dir,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        classifier_batch_size,
        max_comments,
    })
}

/// Read `var` (or its default) and parse it with `FromStr`.
fn parse_var<T, D>(or_default: &D, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: Fn(&str, &str) -> String,
{
    let raw = or_default(var, default);
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
