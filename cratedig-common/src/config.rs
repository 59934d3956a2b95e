//! Configuration loading and config file resolution
//!
//! Config file resolution follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`CRATEDIG_CONFIG`)
//! 3. Per-user config file (`<config_dir>/cratedig/config.toml`)
//! 4. Built-in defaults (fallback)
//!
//! A missing config file is never fatal: a warning is logged and built-in
//! defaults are used. A config file that exists but cannot be parsed is a
//! [`Error::Config`].

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CRATEDIG_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TomlConfig {
    /// Path to the catalog JSON document
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// HTTP bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Encyclopedia API endpoint (`api.php`)
    #[serde(default = "default_wiki_api_url")]
    pub wiki_api_url: String,

    /// Site root used to absolutize root-relative links in extracted content
    #[serde(default = "default_wiki_site_url")]
    pub wiki_site_url: String,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            host: default_host(),
            port: default_port(),
            wiki_api_url: default_wiki_api_url(),
            wiki_site_url: default_wiki_site_url(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/records.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5730
}

fn default_wiki_api_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_wiki_site_url() -> String {
    "https://en.wikipedia.org".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolves which config file to read and loads it with graceful degradation
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// Create a resolver; `cli_path` is the `--config` argument if given
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Determine the config file path by priority order
    ///
    /// Returns `None` when no explicit path was given and no per-user config
    /// file exists.
    pub fn resolve_path(&self) -> Option<PathBuf> {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        // Priority 3: Per-user config file, only if present
        default_config_path().filter(|p| p.exists())
    }

    /// Load configuration, falling back to built-in defaults when the file is missing
    pub fn load(&self) -> Result<TomlConfig> {
        let Some(path) = self.resolve_path() else {
            info!("No config file found, using built-in defaults");
            return Ok(TomlConfig::default());
        };

        if !path.exists() {
            warn!(
                "Config file not found: {} (using built-in defaults)",
                path.display()
            );
            return Ok(TomlConfig::default());
        }

        let config = load_config_file(&path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Read and parse a TOML config file
pub fn load_config_file(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Per-user config file location for the platform
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cratedig").join("config.toml"))
}
