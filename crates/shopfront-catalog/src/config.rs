//! # Shopfront Configuration
//!
//! Configuration for the catalog endpoint and the cart database location.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPFRONT_API_URL=http://127.0.0.1:8080                            │
//! │     SHOPFRONT_HTTP_TIMEOUT=10                                          │
//! │     SHOPFRONT_DB_PATH=/tmp/cart.db                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shopfront/shopfront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.shopfront.shopfront/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     https://fakestoreapi.com, 30 second timeout                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shopfront.toml
//! [catalog]
//! base_url = "https://fakestoreapi.com"
//! timeout_secs = 30
//!
//! [storage]
//! database_path = "/path/to/shopfront.db"   # optional
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use shopfront_core::validation::{validate_base_url, validate_timeout_secs};

/// Default catalog API.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Default file name of the cart database.
pub const DEFAULT_DATABASE_FILE: &str = "shopfront.db";

const CONFIG_FILE: &str = "shopfront.toml";

pub const ENV_API_URL: &str = "SHOPFRONT_API_URL";
pub const ENV_HTTP_TIMEOUT: &str = "SHOPFRONT_HTTP_TIMEOUT";
pub const ENV_DB_PATH: &str = "SHOPFRONT_DB_PATH";

// =============================================================================
// Catalog Settings
// =============================================================================

/// Remote catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL; products are fetched from `{base_url}/products`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Cart database settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Database file. `None` means `shopfront.db` in the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopfrontConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl ShopfrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`shopfront.toml`)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        validate_base_url(&self.catalog.base_url)
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        url::Url::parse(self.catalog.base_url.trim())?;

        validate_timeout_secs(self.catalog.timeout_secs)?;

        if let Some(path) = &self.storage.database_path {
            if path.as_os_str().is_empty() {
                return Err(CatalogError::InvalidConfig(
                    "database_path must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(timeout) = lookup(ENV_HTTP_TIMEOUT) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.catalog.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric {}", ENV_HTTP_TIMEOUT),
            }
        }

        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Resolved database file: the configured path, else the platform data dir.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.storage
            .database_path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join(DEFAULT_DATABASE_FILE)))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "shopfront", "shopfront")
}

/// Parses a config file as-is, without env overrides or validation.
pub fn read_file(path: &Path) -> CatalogResult<ShopfrontConfig> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| CatalogError::ConfigLoadFailed(e.to_string()))?;
    Ok(toml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ShopfrontConfig::default();
        assert_eq!(config.catalog.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.catalog.timeout_secs, 30);
        assert!(config.storage.database_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ShopfrontConfig::default();

        config.catalog.base_url = "ws://localhost".to_string();
        assert!(matches!(config.validate(), Err(CatalogError::InvalidUrl(_))));

        config.catalog.base_url = "http://localhost:8080".to_string();
        config.catalog.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(CatalogError::InvalidConfig(_))
        ));

        config.catalog.timeout_secs = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, "http://127.0.0.1:9000"),
            (ENV_HTTP_TIMEOUT, "7"),
            (ENV_DB_PATH, "/tmp/cart.db"),
        ]);

        let mut config = ShopfrontConfig::default();
        config.apply_overrides_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.catalog.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.catalog.timeout_secs, 7);
        assert_eq!(config.database_path(), Some(PathBuf::from("/tmp/cart.db")));
    }

    #[test]
    fn test_bad_timeout_override_is_ignored() {
        let mut config = ShopfrontConfig::default();
        config.apply_overrides_from(|k| (k == ENV_HTTP_TIMEOUT).then(|| "soon".to_string()));
        assert_eq!(config.catalog.timeout_secs, 30);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ShopfrontConfig = toml::from_str("[catalog]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.catalog.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.catalog.timeout_secs, 5);
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let contents = concat!(
            "[catalog]\n",
            "base_url = \"http://localhost:3000\"\n",
            "\n",
            "[storage]\n",
            "database_path = \"/tmp/c.db\"\n",
        );
        std::fs::write(&path, contents).unwrap();

        let config = read_file(&path).unwrap();
        assert_eq!(config.catalog.base_url, "http://localhost:3000");
        assert_eq!(config.catalog.timeout_secs, 30);
        assert_eq!(config.database_path(), Some(PathBuf::from("/tmp/c.db")));
    }

    #[test]
    fn test_malformed_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[catalog\nbase_url = ").unwrap();

        assert!(matches!(
            read_file(&path),
            Err(CatalogError::ConfigLoadFailed(_))
        ));
    }
}
