//! Configuration System
//!
//! One `Config` serves both environments. The command-line tool loads it
//! from a TOML file with environment variable overrides; the browser build
//! reads the same structure as JSON from the page. Every field has a
//! default, so an empty document is a valid configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub chrome: ChromeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the site lives and how it names itself
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute path of the site root, with trailing slash. Derived from the
    /// script address when absent.
    #[serde(default)]
    pub root_path: Option<String>,

    /// Appended to article titles in the document title
    #[serde(default = "default_title_suffix")]
    pub title_suffix: String,

    /// JSON resources, relative to the root
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Shared HTML fragments, relative to the root
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
}

fn default_title_suffix() -> String {
    "社團法人中華亞太文化交流協會".to_string()
}

fn default_data_dir() -> String {
    "assets/data".to_string()
}

fn default_templates_dir() -> String {
    "assets/templates".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            title_suffix: default_title_suffix(),
            data_dir: default_data_dir(),
            templates_dir: default_templates_dir(),
        }
    }
}

/// Content rendering defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Default number of cards in a news list (all when absent)
    #[serde(default)]
    pub list_limit: Option<usize>,
}

/// Entrance animation and counter settings
#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    /// Fraction of an element that must be visible to reveal it
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// How far above the viewport bottom an element must reach (px)
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin_px: u32,

    /// Delay after the first animation frame before the first scan (ms)
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u32,

    #[serde(default = "default_counter_duration")]
    pub counter_duration_ms: u32,

    #[serde(default = "default_counter_threshold")]
    pub counter_threshold: f64,
}

fn default_threshold() -> f64 {
    0.10
}

fn default_bottom_margin() -> u32 {
    30
}

fn default_settle_delay() -> u32 {
    80
}

fn default_counter_duration() -> u32 {
    1800
}

fn default_counter_threshold() -> f64 {
    0.5
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            bottom_margin_px: default_bottom_margin(),
            settle_delay_ms: default_settle_delay(),
            counter_duration_ms: default_counter_duration(),
            counter_threshold: default_counter_threshold(),
        }
    }
}

impl AnimationConfig {
    /// IntersectionObserver root margin shrinking the viewport bottom
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }
}

/// Navbar, back-to-top and anchor scrolling settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChromeConfig {
    /// Scroll offset after which the navbar gets its `scrolled` style
    #[serde(default = "default_navbar_threshold")]
    pub navbar_scroll_threshold: f64,

    /// Scroll offset after which the back-to-top button shows
    #[serde(default = "default_back_to_top_threshold")]
    pub back_to_top_threshold: f64,

    /// Gap kept between the navbar and an anchor target (px)
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset_px: f64,

    /// Navbar height used when the navbar can't be measured (px)
    #[serde(default = "default_navbar_height")]
    pub fallback_navbar_height: f64,
}

fn default_navbar_threshold() -> f64 {
    80.0
}

fn default_back_to_top_threshold() -> f64 {
    300.0
}

fn default_anchor_offset() -> f64 {
    16.0
}

fn default_navbar_height() -> f64 {
    70.0
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            navbar_scroll_threshold: default_navbar_threshold(),
            back_to_top_threshold: default_back_to_top_threshold(),
            anchor_offset_px: default_anchor_offset(),
            fallback_navbar_height: default_navbar_height(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Parse the JSON form embedded in a page
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("apcea").join("config.toml")),
            Some(PathBuf::from("/etc/apcea/config.toml")),
            Some(PathBuf::from("./apcea.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(root_path) = std::env::var("APCEA_ROOT_PATH") {
            self.site.root_path = Some(root_path);
        }
        if let Ok(data_dir) = std::env::var("APCEA_DATA_DIR") {
            self.site.data_dir = data_dir;
        }

        if let Ok(level) = std::env::var("APCEA_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("APCEA_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# APCEA site configuration
#
# Environment variables override these settings:
# - APCEA_ROOT_PATH
# - APCEA_DATA_DIR
# - APCEA_LOG_LEVEL
# - APCEA_LOG_FORMAT

[site]
# Absolute path of the site root, with trailing slash.
# Leave unset to derive it from the script address.
# root_path = "/"

# Appended to article titles in the browser tab
title_suffix = "社團法人中華亞太文化交流協會"

# JSON data files, relative to the root
data_dir = "assets/data"

# Shared navbar/footer fragments, relative to the root
templates_dir = "assets/templates"

[content]
# Default number of news cards (all when unset)
# list_limit = 6

[animation]
# Visible fraction that reveals an element
threshold = 0.10

# Reveal this many pixels before the element reaches the viewport bottom
bottom_margin_px = 30

# Wait after the first frame before the first scan (ms)
settle_delay_ms = 80

# Counter animation length (ms) and visibility trigger
counter_duration_ms = 1800
counter_threshold = 0.5

[chrome]
navbar_scroll_threshold = 80.0
back_to_top_threshold = 300.0
anchor_offset_px = 16.0
fallback_navbar_height = 70.0

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.site.data_dir, "assets/data");
        assert_eq!(config.site.root_path, None);
        assert_eq!(config.animation.counter_duration_ms, 1800);
        assert_eq!(config.animation.root_margin(), "0px 0px -30px 0px");
        assert_eq!(config.chrome.fallback_navbar_height, 70.0);
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::from_toml(&generate_default_config()).unwrap();
        assert_eq!(config.site.title_suffix, "社團法人中華亞太文化交流協會");
        assert_eq!(config.animation.threshold, 0.10);
        assert_eq!(config.content.list_limit, None);
    }

    #[test]
    fn test_json_form() {
        let config = Config::from_json(r#"{"site":{"root_path":"/sub/"},"content":{"list_limit":3}}"#)
            .unwrap();
        assert_eq!(config.site.root_path.as_deref(), Some("/sub/"));
        assert_eq!(config.content.list_limit, Some(3));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apcea.toml");
        std::fs::write(&path, "[site\nbroken").unwrap();

        match Config::load(&path) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
