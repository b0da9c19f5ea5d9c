use std::path::PathBuf;

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

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let youtube_api_key = require("YOUTUBE_API_KEY")?;
    let channel_id = require("STREAMWATCH_CHANNEL_ID")?;

    let log_level = or_default("STREAMWATCH_LOG_LEVEL", "info");
    let log_dir = PathBuf::from(or_default("STREAMWATCH_LOG_DIR", "./data"));
    let out_dir = PathBuf::from(or_default("STREAMWATCH_OUT_DIR", "./site"));
    let schedule_feed_url = lookup("STREAMWATCH_SCHEDULE_FEED_URL").ok();
    let site_rebuild_cmd = lookup("STREAMWATCH_SITE_REBUILD_CMD").ok();

    let poll_interval_secs = parse_u64("STREAMWATCH_POLL_INTERVAL_SECS", "60")?;
    if poll_interval_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STREAMWATCH_POLL_INTERVAL_SECS".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    let search_backoff_secs = parse_u64("STREAMWATCH_SEARCH_BACKOFF_SECS", "300")?;
    let request_timeout_secs = parse_u64("STREAMWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let min_duration_mins = parse_i64("STREAMWATCH_MIN_DURATION_MINS", "15")?;
    let recorder_cmd = or_default("STREAMWATCH_RECORDER_CMD", "chat-recorder");
    let recorder_grace_secs = parse_u64("STREAMWATCH_RECORDER_GRACE_SECS", "8")?;
    let svg_optimizer = or_default("STREAMWATCH_SVG_OPTIMIZER", "svgo");
    let png_optimizer = or_default("STREAMWATCH_PNG_OPTIMIZER", "optipng");

    Ok(AppConfig {
        youtube_api_key,
        channel_id,
        log_level,
        log_dir,
        out_dir,
        schedule_feed_url,
        poll_interval_secs,
        search_backoff_secs,
        request_timeout_secs,
        min_duration_mins,
        recorder_cmd,
        recorder_grace_secs,
        svg_optimizer,
        png_optimizer,
        site_rebuild_cmd,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid values.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("YOUTUBE_API_KEY", "test-api-key");
        m.insert("STREAMWATCH_CHANNEL_ID", "UCtest");
        m
    }

    #[test]
    fn build_app_config_fails_without_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "YOUTUBE_API_KEY"),
            "expected MissingEnvVar(YOUTUBE_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_channel_id() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("YOUTUBE_API_KEY", "test-api-key");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "STREAMWATCH_CHANNEL_ID"),
            "expected MissingEnvVar(STREAMWATCH_CHANNEL_ID), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.channel_id, "UCtest");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_dir, PathBuf::from("./data"));
        assert_eq!(cfg.out_dir, PathBuf::from("./site"));
        assert!(cfg.schedule_feed_url.is_none());
        assert!(cfg.site_rebuild_cmd.is_none());
        assert_eq!(cfg.poll_interval_secs, 60);
        assert_eq!(cfg.search_backoff_secs, 300);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.min_duration_mins, 15);
        assert_eq!(cfg.recorder_cmd, "chat-recorder");
        assert_eq!(cfg.recorder_grace_secs, 8);
        assert_eq!(cfg.svg_optimizer, "svgo");
        assert_eq!(cfg.png_optimizer, "optipng");
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = full_env();
        map.insert("STREAMWATCH_SEARCH_BACKOFF_SECS", "60");
        map.insert("STREAMWATCH_MIN_DURATION_MINS", "30");
        map.insert("STREAMWATCH_RECORDER_CMD", "/usr/local/bin/chat-dl");
        map.insert("STREAMWATCH_SCHEDULE_FEED_URL", "https://example.com/feed.json");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.search_backoff_secs, 60);
        assert_eq!(cfg.min_duration_mins, 30);
        assert_eq!(cfg.recorder_cmd, "/usr/local/bin/chat-dl");
        assert_eq!(
            cfg.schedule_feed_url.as_deref(),
            Some("https://example.com/feed.json")
        );
    }

    #[test]
    fn build_app_config_rejects_non_numeric_backoff() {
        let mut map = full_env();
        map.insert("STREAMWATCH_SEARCH_BACKOFF_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STREAMWATCH_SEARCH_BACKOFF_SECS"),
            "expected InvalidEnvVar(STREAMWATCH_SEARCH_BACKOFF_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_poll_interval() {
        let mut map = full_env();
        map.insert("STREAMWATCH_POLL_INTERVAL_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STREAMWATCH_POLL_INTERVAL_SECS"),
            "expected InvalidEnvVar(STREAMWATCH_POLL_INTERVAL_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_numeric_grace() {
        let mut map = full_env();
        map.insert("STREAMWATCH_RECORDER_GRACE_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STREAMWATCH_RECORDER_GRACE_SECS"),
            "expected InvalidEnvVar(STREAMWATCH_RECORDER_GRACE_SECS), got: {result:?}"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("test-api-key"));
        assert!(rendered.contains("[redacted]"));
    }
}
