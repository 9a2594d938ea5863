//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Remote catalog addressing settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkpoint and export paths
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agents.is_empty() {
            return Err(AppError::validation("http.user_agents is empty"));
        }
        if self.http.user_agents.iter().any(|ua| ua.trim().is_empty()) {
            return Err(AppError::validation(
                "http.user_agents contains a blank entry",
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.catalog.id_width == 0 {
            return Err(AppError::validation("catalog.id_width must be > 0"));
        }
        url::Url::parse(&self.catalog.base_url)
            .map_err(|e| AppError::validation(format!("catalog.base_url is invalid: {e}")))?;
        if self.storage.checkpoint_path.as_os_str().is_empty() {
            return Err(AppError::validation("storage.checkpoint_path is empty"));
        }
        if self.storage.export_prefix.trim().is_empty() {
            return Err(AppError::validation("storage.export_prefix is empty"));
        }
        Ok(())
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent pool; one entry is picked at random per request
    #[serde(default = "defaults::user_agents")]
    pub user_agents: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Skip TLS certificate validation (remote service quirk)
    #[serde(default = "defaults::accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agents: defaults::user_agents(),
            timeout_secs: defaults::timeout(),
            accept_invalid_certs: defaults::accept_invalid_certs(),
        }
    }
}

/// Remote catalog addressing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Detail page URL prefix; the normalized identifier is appended
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Zero-padded width of a normalized identifier
    #[serde(default = "defaults::id_width")]
    pub id_width: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            id_width: defaults::id_width(),
        }
    }
}

/// Checkpoint and export paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File holding the last fully-processed identifier
    #[serde(default = "defaults::checkpoint_path")]
    pub checkpoint_path: PathBuf,

    /// Directory receiving exported artifacts
    #[serde(default = "defaults::export_dir")]
    pub export_dir: PathBuf,

    /// File name prefix for exported artifacts
    #[serde(default = "defaults::export_prefix")]
    pub export_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            checkpoint_path: defaults::checkpoint_path(),
            export_dir: defaults::export_dir(),
            export_prefix: defaults::export_prefix(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // HTTP defaults
    pub fn user_agents() -> Vec<String> {
        vec![
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".into(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".into(),
            "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:52.0) Gecko/20100101 Firefox/52.0".into(),
        ]
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn accept_invalid_certs() -> bool {
        true
    }

    // Catalog defaults
    pub fn base_url() -> String {
        "https://www.digitale-sammlungen.de/en/details/bsb".into()
    }
    pub fn id_width() -> usize {
        8
    }

    // Storage defaults
    pub fn checkpoint_path() -> PathBuf {
        "last_processed_id.txt".into()
    }
    pub fn export_dir() -> PathBuf {
        "scraped_files".into()
    }
    pub fn export_prefix() -> String {
        "scraped_data".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent_pool() {
        let mut config = Config::default();
        config.http.user_agents.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_user_agent() {
        let mut config = Config::default();
        config.http.user_agents.push("   ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.catalog.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_toml_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[http]
timeout_secs = 5

[catalog]
id_width = 10
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.catalog.id_width, 10);
        // Unspecified tables fall back to defaults
        assert_eq!(config.http.user_agents.len(), 3);
        assert_eq!(config.storage.export_prefix, "scraped_data");
    }
}
