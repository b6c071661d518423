use std::env;

use crate::domain::entities::Theme;

/// Default remote catalog of feed URLs
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/kgFixed/kgFixed.github.io/refs/heads/main/feeds.json";

/// Default hosted LDES explorer
pub const DEFAULT_VIEWER_BASE_URL: &str = "https://xplorer.ajuvercr.be/ldes";

pub const DEFAULT_TITLE: &str = "KgFixed LDES Navigator";

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the JSON catalog of feed descriptors lives
    pub catalog_url: String,
    /// Base URL of the external viewer; the encoded feed URL is appended
    pub viewer_base_url: String,
    /// Brand shown in the page header
    pub title: String,
    pub theme: Theme,
    /// Timeout for every outbound request
    pub fetch_timeout_secs: u64,
    /// Probe every feed after a refresh
    pub probe_on_refresh: bool,
    /// Per-IP rate limiting on routes that reach upstream hosts
    pub rate_limit_enabled: bool,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            viewer_base_url: DEFAULT_VIEWER_BASE_URL.to_string(),
            title: DEFAULT_TITLE.to_string(),
            theme: Theme::Light,
            fetch_timeout_secs: 10,
            probe_on_refresh: false,
            rate_limit_enabled: true,
            port: 8080,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let theme = match env::var("NAVIGATOR_THEME") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, using light theme", e);
                Theme::Light
            }),
            Err(_) => defaults.theme,
        };

        Self {
            catalog_url: env::var("CATALOG_URL").unwrap_or(defaults.catalog_url),
            viewer_base_url: env::var("VIEWER_BASE_URL").unwrap_or(defaults.viewer_base_url),
            title: env::var("NAVIGATOR_TITLE").unwrap_or(defaults.title),
            theme,
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fetch_timeout_secs),
            probe_on_refresh: env_flag("PROBE_ON_REFRESH", defaults.probe_on_refresh),
            rate_limit_enabled: env_flag("RATE_LIMIT_ENABLED", defaults.rate_limit_enabled),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|v| parse_flag(&v, default))
        .unwrap_or(default)
}

fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
