//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::{AppConfig, USER_PLACEHOLDER};
use thiserror::Error;

/// Longest TTL accepted for cached lookups (24 hours).
const MAX_CACHE_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` or `default_user` is empty
    /// - `profile_url_template` lacks the `{user}` placeholder
    /// - `cache_ttl_ms` exceeds 24 hours
    /// - `snippet_chars` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.default_user.trim().trim_start_matches('@').is_empty() {
            return Err(ConfigError::Invalid { field: "default_user".into(), reason: "must not be empty".into() });
        }

        if !self.profile_url_template.contains(USER_PLACEHOLDER) {
            return Err(ConfigError::Invalid {
                field: "profile_url_template".into(),
                reason: format!("must contain {USER_PLACEHOLDER}"),
            });
        }

        if self.cache_ttl_ms > MAX_CACHE_TTL_MS {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_ms".into(),
                reason: "must not exceed 24 hours (86400000ms)".into(),
            });
        }

        if self.snippet_chars == 0 {
            return Err(ConfigError::Invalid { field: "snippet_chars".into(), reason: "must be greater than 0".into() });
        }

        if self.cache_ttl_ms == 0 {
            tracing::warn!("cache_ttl_ms is 0; every lookup will refetch the profile page");
        }

        Ok(())
    }
}
