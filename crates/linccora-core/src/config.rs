use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the backend URL
pub const API_URL_ENV: &str = "LINCCORA_API_URL";

/// Main configuration structure
///
/// Loaded from the config file, then the environment, then CLI flags.
/// Priority: CLI > Env > File > Defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
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

    /// Apply `LINCCORA_API_URL` if it is set and non-empty
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            self.api.apply_override(Some(url));
        }
    }

    /// Uses XDG on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        Ok(app_dir(dirs::config_dir(), "config")?.join("config.toml"))
    }

    /// Where the wishlist database lives unless configured otherwise
    pub fn database_path(&self) -> crate::Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(app_dir(dirs::data_dir(), "data")?.join("storefront.db")),
        }
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path() -> crate::Result<PathBuf> {
        Ok(app_dir(dirs::data_dir(), "data")?.join("linccora.log"))
    }
}

fn app_dir(base: Option<PathBuf>, kind: &str) -> crate::Result<PathBuf> {
    base.map(|dir| dir.join("linccora"))
        .ok_or_else(|| crate::Error::ConfigError(format!("Could not find {} directory", kind)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Product-search backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    linccora_api::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    15
}

impl ApiConfig {
    /// Replace the base URL when `url` is a non-empty value
    pub fn apply_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// SQLite file for the wishlist (default: data dir)
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Brand slideshow rotation on the home screen
    #[serde(default = "default_slideshow_interval")]
    pub slideshow_interval_ms: u64,

    /// Hero rotation on the landing screen
    #[serde(default = "default_landing_interval")]
    pub landing_interval_ms: u64,

    /// Quiet period after typing before a search goes out. 0 searches on every keystroke.
    #[serde(default = "default_debounce")]
    pub search_debounce_ms: u64,

    #[serde(default = "default_max_brand_options")]
    pub max_brand_options: usize,

    #[serde(default = "default_max_category_options")]
    pub max_category_options: usize,

    #[serde(default = "default_featured_brand_limit")]
    pub featured_brand_limit: usize,
}

fn default_slideshow_interval() -> u64 {
    4000
}

fn default_landing_interval() -> u64 {
    5000
}

fn default_debounce() -> u64 {
    250
}

fn default_max_brand_options() -> usize {
    10
}

fn default_max_category_options() -> usize {
    8
}

fn default_featured_brand_limit() -> usize {
    12
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            slideshow_interval_ms: default_slideshow_interval(),
            landing_interval_ms: default_landing_interval(),
            search_debounce_ms: default_debounce(),
            max_brand_options: default_max_brand_options(),
            max_category_options: default_max_category_options(),
            featured_brand_limit: default_featured_brand_limit(),
        }
    }
}
