use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ShowreelError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Marker used by the shipped config for values the user still has to fill in.
const PLACEHOLDER_MARKER: &str = "YOUR_";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub sheet_csv_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub admin_url: String,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Returns the trimmed value, or `None` when it is blank or still a placeholder.
fn configured(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value.contains(PLACEHOLDER_MARKER) {
        None
    } else {
        Some(value)
    }
}

impl AppConfig {
    /// Load config: user file (if exists), otherwise built-in defaults.
    pub fn load() -> Result<Self, ShowreelError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Self::from_toml(DEFAULT_CONFIG)
        }
    }

    /// Load config from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self, ShowreelError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ShowreelError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ShowreelError> {
        toml::from_str(content).map_err(|e| ShowreelError::Config(e.to_string()))
    }

    /// Save current config to the given path.
    pub fn save_to(&self, path: &Path) -> Result<(), ShowreelError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ShowreelError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), ShowreelError> {
        self.save_to(&Self::config_path())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "showreel")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// The published sheet URL, if one has been configured.
    ///
    /// Fails when a value is present but is not an absolute http(s) URL.
    pub fn sheet_url(&self) -> Result<Option<&str>, ShowreelError> {
        let Some(raw) = configured(&self.source.sheet_csv_url) else {
            return Ok(None);
        };
        let parsed = url::Url::parse(raw)
            .map_err(|e| ShowreelError::Config(format!("invalid sheet URL {raw:?}: {e}")))?;
        match parsed.scheme() {
            "http" | "https" => Ok(Some(raw)),
            other => Err(ShowreelError::Config(format!(
                "sheet URL must be http(s), got {other}"
            ))),
        }
    }

    /// The Data API key, if one has been configured.
    pub fn api_key(&self) -> Option<&str> {
        configured(&self.youtube.api_key)
    }

    pub fn admin_url(&self) -> Option<&str> {
        let url = self.site.admin_url.trim();
        (!url.is_empty()).then_some(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.youtube.request_timeout_secs.max(1))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
