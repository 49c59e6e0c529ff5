//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (FOLLOWCOUNT_*)
//! 2. Plain `PORT` environment variable
//! 3. TOML config file (if FOLLOWCOUNT_CONFIG_FILE set)
//! 4. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Placeholder replaced by the handle in `profile_url_template`.
pub const USER_PLACEHOLDER: &str = "{user}";

/// Which surface the server binary exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// HTTP endpoint on `host:port`.
    #[default]
    Http,
    /// MCP tools over stdin/stdout.
    Stdio,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (FOLLOWCOUNT_*)
/// 2. `PORT`
/// 3. TOML config file (if FOLLOWCOUNT_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Surface to serve.
    ///
    /// Set via FOLLOWCOUNT_TRANSPORT environment variable.
    #[serde(default)]
    pub transport: Transport,

    /// Interface the HTTP endpoint binds to.
    ///
    /// Set via FOLLOWCOUNT_HOST environment variable.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP endpoint listens on.
    ///
    /// Set via PORT or FOLLOWCOUNT_PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Handle looked up when the caller supplies none.
    ///
    /// Set via FOLLOWCOUNT_DEFAULT_USER environment variable.
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Profile page URL with a `{user}` placeholder.
    ///
    /// Set via FOLLOWCOUNT_PROFILE_URL_TEMPLATE environment variable.
    #[serde(default = "default_profile_url_template")]
    pub profile_url_template: String,

    /// User-Agent string for profile requests.
    ///
    /// Set via FOLLOWCOUNT_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header for profile requests.
    ///
    /// Set via FOLLOWCOUNT_ACCEPT_LANGUAGE environment variable.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via FOLLOWCOUNT_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via FOLLOWCOUNT_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Maximum number of redirects to follow.
    ///
    /// Set via FOLLOWCOUNT_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// How long a lookup result is served from cache, in milliseconds.
    ///
    /// Set via FOLLOWCOUNT_CACHE_TTL_MS environment variable.
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,

    /// Characters of page body included in debug output.
    ///
    /// Set via FOLLOWCOUNT_SNIPPET_CHARS environment variable.
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    5173
}

fn default_user() -> String {
    "boy.throb".into()
}

fn default_profile_url_template() -> String {
    "https://www.tiktok.com/@{user}".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .into()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_max_redirects() -> usize {
    5
}

fn default_cache_ttl_ms() -> u64 {
    60_000
}

fn default_snippet_chars() -> usize {
    1200
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            host: default_host(),
            port: default_port(),
            default_user: default_user(),
            profile_url_template: default_profile_url_template(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            max_redirects: default_max_redirects(),
            cache_ttl_ms: default_cache_ttl_ms(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache TTL as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// `host:port` string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `FOLLOWCOUNT_`
    /// 2. `PORT`
    /// 3. TOML file from `FOLLOWCOUNT_CONFIG_FILE` (if set)
    /// 4. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("FOLLOWCOUNT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment
            .merge(Env::raw().only(&["PORT"]).map(|key| key.as_str().to_lowercase().into()))
            .merge(
                Env::prefixed("FOLLOWCOUNT_")
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.transport, Transport::Http);
        assert_eq!(config.port, 5173);
        assert_eq!(config.default_user, "boy.throb");
        assert_eq!(config.profile_url_template, "https://www.tiktok.com/@{user}");
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.cache_ttl_ms, 60_000);
        assert_eq!(config.snippet_chars, 1200);
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_bind_addr() {
        let config = AppConfig { host: "0.0.0.0".into(), port: 8080, ..Default::default() };
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PORT", "9000");
            jail.set_env("FOLLOWCOUNT_TRANSPORT", "stdio");
            jail.set_env("FOLLOWCOUNT_CACHE_TTL_MS", "30000");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.port, 9000);
            assert_eq!(config.transport, Transport::Stdio);
            assert_eq!(config.cache_ttl(), Duration::from_secs(30));
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_port_wins_over_plain_port() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PORT", "9000");
            jail.set_env("FOLLOWCOUNT_PORT", "9100");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.port, 9100);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("followcount.toml", "default_user = \"someone\"\nsnippet_chars = 400\n")?;
            jail.set_env("FOLLOWCOUNT_CONFIG_FILE", "followcount.toml");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.default_user, "someone");
            assert_eq!(config.snippet_chars, 400);
            Ok(())
        });
    }
}
