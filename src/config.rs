// src/config.rs
// =============================================================================
// Runtime settings for a check run.
//
// Resolution order (later wins):
// 1. Built-in defaults (batch of 5, 10 second timeout)
// 2. Optional TOML file passed with --config
// 3. Command-line flags
//
// Example config file:
//
//   batch_size = 5
//   timeout_secs = 10
//   max_redirects = 10
//   max_file_bytes = 10485760
//   service_url = "https://checker.example.com/check-url"
// =============================================================================

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How many probes run at the same time
    pub batch_size: usize,
    /// Per-probe timeout
    pub timeout_secs: u64,
    /// Redirect hops followed before giving up
    pub max_redirects: usize,
    /// Bookmark files above this size are rejected before reading
    pub max_file_bytes: u64,
    pub user_agent: String,
    /// When set, probes go through a remote check service instead of
    /// being sent directly
    pub service_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            user_agent: format!("bookmark-guardian/{}", env!("CARGO_PKG_VERSION")),
            service_url: None,
        }
    }
}

impl Config {
    /// Reads a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        if let Some(service_url) = &self.service_url {
            url::Url::parse(service_url)
                .map_err(|e| Error::Config(format!("service_url '{}': {}", service_url, e)))?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.service_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("batch_size = 8\n").unwrap();
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let result = Config::from_toml("batch_size = 0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Config::from_toml("batchsize = 3\n");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_bad_service_url_rejected() {
        let result = Config::from_toml("service_url = \"not a url\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guardian.toml");
        std::fs::write(&path, "timeout_secs = 3\nservice_url = \"http://localhost:8787/check-url\"\n")
            .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(
            config.service_url.as_deref(),
            Some("http://localhost:8787/check-url")
        );
    }
}
