//! Configuration types for the PWA extension.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_PORT;
use crate::color::DEFAULT_THEME;

/// Presentation configuration for the embed snippets and cache policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PwaConfig {
    /// Cache policy version; bumping it rotates the client cache buckets.
    pub policy_version: u32,
    /// Theme color injected into the page head.
    pub theme_color: String,
    /// Application title for the Apple PWA meta tag.
    pub app_title: String,
}

impl Default for PwaConfig {
    fn default() -> Self {
        Self {
            policy_version: 1,
            theme_color: DEFAULT_THEME.to_string(),
            app_title: "Directus".to_string(),
        }
    }
}

impl PwaConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache policy version.
    #[must_use]
    pub const fn with_policy_version(mut self, version: u32) -> Self {
        self.policy_version = version;
        self
    }

    /// Sets the head theme color.
    #[must_use]
    pub fn with_theme_color(mut self, color: impl Into<String>) -> Self {
        self.theme_color = color.into();
        self
    }

    /// Sets the Apple PWA title.
    #[must_use]
    pub fn with_app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = title.into();
        self
    }
}

/// Standalone server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server bind address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Host settings-endpoint configuration for the HTTP settings reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectusConfig {
    /// Base URL of the host application.
    pub base_url: String,
    /// Static admin token for the settings endpoint, if required.
    pub admin_token: Option<String>,
}

impl Default for DirectusConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8055".to_string(),
            admin_token: None,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Presentation and policy configuration.
    pub pwa: PwaConfig,
    /// Server configuration.
    pub api: ApiConfig,
    /// Host settings-endpoint configuration.
    pub directus: DirectusConfig,
}

impl AppConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file path (`admin-pwa/config.toml`).
    #[must_use]
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("admin-pwa")
            .join("config.toml")
    }

    /// Loads configuration from the platform config file, or defaults when
    /// no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn default_pwa_config() {
        let config = PwaConfig::default();
        assert_eq!(config.policy_version, 1);
        assert_eq!(config.theme_color, "#6644ff");
        assert_eq!(config.app_title, "Directus");
    }

    #[test]
    fn pwa_config_builder_pattern() {
        let config = PwaConfig::new()
            .with_policy_version(3)
            .with_theme_color("#123abc")
            .with_app_title("Intranet");
        assert_eq!(config.policy_version, 3);
        assert_eq!(config.theme_color, "#123abc");
        assert_eq!(config.app_title, "Intranet");
    }

    #[test]
    fn default_api_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn app_config_serializes_to_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.pwa.theme_color, config.pwa.theme_color);
        assert_eq!(deserialized.api.port, config.api.port);
        assert_eq!(deserialized.directus.base_url, config.directus.base_url);
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.pwa.policy_version, 1);
    }

    #[test]
    fn load_from_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[pwa]\npolicy_version = 2\n\n[api]\nport = 9000").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.pwa.policy_version, 2);
        assert_eq!(config.pwa.theme_color, "#6644ff");
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.directus.base_url, "http://127.0.0.1:8055");
    }

    #[test]
    fn load_from_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pwa = \"not a table\"").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
