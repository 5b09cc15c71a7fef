//! Configuration loading for the nftfeed CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.nftfeed/config.toml` (user)
//! 3. `/etc/nftfeed/config.toml` (system)
//!
//! With no file anywhere the built-in defaults apply. Every key is optional.
//!
//! ```toml
//! [collection]
//! name = "Bitcoin Pepe"
//! api_base = "https://api.gamma.io"
//!
//! [retry]
//! retries = 3
//! delay_ms = 1000
//! timeout_secs = 30
//!
//! [cache]
//! collection_ttl_secs = 300
//! token_list_ttl_secs = 300
//! token_sample_ttl_secs = 30
//! max_entries = 1000
//!
//! [rotation]
//! enabled = true
//! period_ms = 8000
//! default_limit = 12
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::cache::TtlPolicy;
use crate::profile::CollectionProfile;
use crate::providers::RetryConfig;
use crate::rotation::RotationConfig;
use crate::{FeedError, NftFeed, NftFeedBuilder, Result};

/// File configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub collection: CollectionProfile,
    #[serde(default)]
    pub retry: RetrySection,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub rotation: RotationSection,
}

/// Fetcher retry and timeout settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySection {
    /// Retries after the first attempt (default: 3).
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Fixed delay between attempts in milliseconds (default: 1000).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_retries() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout() -> u64 {
    30
}

/// Cache lifetimes.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    /// Collection overview TTL (default: 300).
    #[serde(default = "default_long_ttl")]
    pub collection_ttl_secs: u64,
    /// Live token list TTL (default: 300).
    #[serde(default = "default_long_ttl")]
    pub token_list_ttl_secs: u64,
    /// Rotation sample TTL (default: 30).
    #[serde(default = "default_sample_ttl")]
    pub token_sample_ttl_secs: u64,
    /// Upper bound on cached entries.
    #[serde(default)]
    pub max_entries: Option<u64>,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            collection_ttl_secs: default_long_ttl(),
            token_list_ttl_secs: default_long_ttl(),
            token_sample_ttl_secs: default_sample_ttl(),
            max_entries: None,
        }
    }
}

fn default_long_ttl() -> u64 {
    300
}

fn default_sample_ttl() -> u64 {
    30
}

/// Rotation driver settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RotationSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Milliseconds between rotations (default: 8000).
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
    /// Tokens shown on resume and retry (default: 12).
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for RotationSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            period_ms: default_period_ms(),
            default_limit: default_limit(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_period_ms() -> u64 {
    8000
}

fn default_limit() -> usize {
    12
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; must exist)
    /// 2. `~/.nftfeed/config.toml`
    /// 3. `/etc/nftfeed/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit_path)? else {
            debug!("no config file found, using defaults");
            return Ok(Self::default());
        };
        let content = fs::read_to_string(&path).map_err(|e| {
            FeedError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        debug!(?path, "loaded config file");
        Self::from_toml_str(&content)
            .map_err(|e| FeedError::Configuration(format!("In config file {path:?}: {e}")))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| FeedError::Configuration(format!("Failed to parse config: {e}")))?;
        config.rotation_config().validate()?;
        Ok(config)
    }

    /// Resolve the config file path, or `None` when no file exists.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(FeedError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".nftfeed").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/nftfeed/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new()
            .retries(self.retry.retries)
            .delay(Duration::from_millis(self.retry.delay_ms))
    }

    pub fn ttl_policy(&self) -> TtlPolicy {
        TtlPolicy::new()
            .collection(Duration::from_secs(self.cache.collection_ttl_secs))
            .token_list(Duration::from_secs(self.cache.token_list_ttl_secs))
            .token_sample(Duration::from_secs(self.cache.token_sample_ttl_secs))
    }

    pub fn rotation_config(&self) -> RotationConfig {
        RotationConfig::new()
            .enabled(self.rotation.enabled)
            .period(Duration::from_millis(self.rotation.period_ms))
            .default_limit(self.rotation.default_limit)
    }

    /// A feed builder carrying every setting from this file.
    pub fn into_builder(self) -> NftFeedBuilder {
        let mut builder = NftFeed::builder()
            .retry(self.retry_config())
            .ttl(self.ttl_policy())
            .timeout(Duration::from_secs(self.retry.timeout_secs));
        if let Some(max) = self.cache.max_entries {
            builder = builder.max_cache_entries(max);
        }
        builder.collection(self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueryClass;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.retry.retries, 3);
        assert_eq!(config.retry.delay_ms, 1000);
        assert_eq!(config.cache.collection_ttl_secs, 300);
        assert_eq!(config.cache.token_sample_ttl_secs, 30);
        assert!(config.rotation.enabled);
        assert_eq!(config.rotation.period_ms, 8000);
        assert_eq!(config.collection, CollectionProfile::default());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.retry_config(), RetryConfig::default());
        assert_eq!(config.rotation_config(), RotationConfig::default());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
            [collection]
            name = "Other"
            api_base = "http://127.0.0.1:9000"

            [retry]
            retries = 1

            [cache]
            token_sample_ttl_secs = 5

            [rotation]
            enabled = false
        "#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.collection.name, "Other");
        assert_eq!(config.collection.api_base, "http://127.0.0.1:9000");
        // Defaults preserved
        assert_eq!(config.collection.slug, "bitcoin-pepe");
        assert_eq!(config.collection.token_endpoints.len(), 5);
        assert_eq!(config.retry.delay_ms, 1000);

        assert_eq!(config.retry_config().max_attempts(), 2);
        let ttl = config.ttl_policy();
        assert_eq!(ttl.ttl(QueryClass::TokenSample), Duration::from_secs(5));
        assert_eq!(ttl.ttl(QueryClass::TokenList), Duration::from_secs(300));
        assert!(!config.rotation_config().enabled);
    }

    #[test]
    fn endpoint_lists_override() {
        let toml = r#"
            [collection]
            collection_endpoints = ["{base}/only"]
        "#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.collection.collection_urls(), vec!["https://api.gamma.io/only"]);
    }

    #[test]
    fn malformed_config_is_configuration_error() {
        let err = Config::from_toml_str("[retry]\nretries = \"many\"").unwrap_err();
        assert!(matches!(err, FeedError::Configuration(_)));
    }

    #[test]
    fn zero_rotation_period_is_rejected() {
        let err = Config::from_toml_str("[rotation]\nperiod_ms = 0").unwrap_err();
        assert!(matches!(err, FeedError::Configuration(_)));
        assert!(err.to_string().contains("rotation period"));
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }
}
