//! Configuration loading for hermodd.
//!
//! Configuration is loaded from TOML files with the following resolution
//! order:
//! 1. `--config <path>` (CLI flag)
//! 2. `./hermod.toml` (working directory)
//! 3. `/etc/hermod/config.toml` (system)
//!
//! Only the two upstream base URLs are required:
//!
//! ```toml
//! [upstream]
//! json_api_url = "https://content.example.com/api"
//! search_api_url = "https://search.example.com"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{HermodError, Result};

/// Daemon configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Listener network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:9780).
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:9780".to_string()
}

/// Upstream API endpoints and timeouts.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the generic JSON API.
    pub json_api_url: String,
    /// Base URL of the search API.
    pub search_api_url: String,
    /// Connect timeout in milliseconds (default: 500).
    #[serde(default = "default_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Total call timeout in milliseconds (default: 500).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    500
}

/// Response cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Entry time-to-live in seconds (default: 300).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Maximum number of entries (default: 10,000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_max_entries() -> u64 {
    10_000
}

impl Config {
    /// Load configuration, trying `explicit` first, then the default
    /// locations.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => find_default_config().ok_or_else(|| {
                HermodError::Configuration(
                    "no config file found (tried ./hermod.toml, /etc/hermod/config.toml)".into(),
                )
            })?,
        };
        Self::load_file(&path)
    }

    /// Load and parse a specific TOML file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| HermodError::Configuration(format!("{}: {e}", path.display())))
    }
}

fn find_default_config() -> Option<PathBuf> {
    let candidates = [
        PathBuf::from("hermod.toml"),
        PathBuf::from("/etc/hermod/config.toml"),
    ];
    candidates.into_iter().find(|p| p.exists())
}
