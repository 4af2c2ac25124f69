use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::currency::CurrencyFilterPolicy;

/// Main configuration structure
///
/// Loaded from the config file; CLI flags override individual fields.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub currency: CurrencyFilterPolicy,
}

impl Config {
    /// Load config from default location, falling back to defaults if there is none
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the config file path (XDG config dir on Unix, AppData on Windows)
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("issuescout");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Set to false to never send a request to the geolocation service
    #[serde(default = "default_geo_enabled")]
    pub enabled: bool,

    #[serde(default = "default_geo_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_geo_timeout")]
    pub timeout_secs: u64,
}

fn default_geo_enabled() -> bool {
    true
}

fn default_geo_endpoint() -> String {
    issuescout_api::IPAPI_ENDPOINT.to_string()
}

fn default_geo_timeout() -> u64 {
    5 // a slow lookup is worse than a locale guess
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: default_geo_enabled(),
            endpoint: default_geo_endpoint(),
            timeout_secs: default_geo_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Where preferences are persisted; defaults to the platform data dir
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_data_dir(&self) -> crate::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(dirs::data_dir()
                .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?
                .join("issuescout")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocaleConfig {
    /// Pin the locale instead of reading LANG and friends
    pub override_locale: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.geolocation.enabled);
        assert_eq!(config.geolocation.endpoint, "https://ipapi.co/json/");
        assert_eq!(config.geolocation.timeout_secs, 5);
        assert!(config.currency.assume_usd_when_unmarked);
        assert!(config.locale.override_locale.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("timeout_secs"));
        assert!(toml.contains("assume_usd_when_unmarked"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [geolocation]
            enabled = false

            [currency]
            assume_usd_when_unmarked = false
            "#,
        )
        .unwrap();

        assert!(!config.geolocation.enabled);
        assert_eq!(config.geolocation.timeout_secs, 5);
        assert!(!config.currency.assume_usd_when_unmarked);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.locale.override_locale = Some("de-DE".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.locale.override_locale.as_deref(), Some("de-DE"));
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(loaded.geolocation.enabled);
    }
}
