//! Configuration handling for vite-bridge
//!
//! Parses and manages vite-bridge.toml configuration files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Built asset settings
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Dev-server passthrough settings
    #[serde(default)]
    pub dev: DevConfig,

    /// Root directory (computed from config file location)
    #[serde(skip)]
    pub root: PathBuf,
}

/// Settings describing where built assets live and how they are addressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding the Vite build output (outDir)
    #[serde(default = "default_assets_dir")]
    pub dir: String,

    /// Manifest path relative to the assets directory
    #[serde(default = "default_manifest_path")]
    pub manifest: String,

    /// Optional URL prefix prepended to every built asset path, e.g. for
    /// serving from a CDN or a mounted static route
    #[serde(default)]
    pub prefix: Option<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            manifest: default_manifest_path(),
            prefix: None,
        }
    }
}

/// Settings for running against a live Vite dev server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// Bypass the built manifest and point entries at the dev server
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the Vite dev server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Entry module served from the dev server
    #[serde(default = "default_entry")]
    pub entry: String,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            server_url: default_server_url(),
            entry: default_entry(),
        }
    }
}

fn default_assets_dir() -> String {
    "dist".to_string()
}

fn default_manifest_path() -> String {
    ".vite/manifest.json".to_string()
}

fn default_server_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_entry() -> String {
    "src/main.js".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let canonical_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let content = std::fs::read_to_string(&canonical_path)
            .with_context(|| format!("Failed to read config file: {}", canonical_path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse vite-bridge.toml")?;

        // Set root directory to the directory containing the config file
        config.root = canonical_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults rooted at the current
    /// directory when the config file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default_config())
        }
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            assets: AssetsConfig::default(),
            dev: DevConfig::default(),
            root: PathBuf::from("."),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.assets.dir.is_empty() {
            anyhow::bail!("[assets] dir must not be empty");
        }
        if self.assets.manifest.is_empty() {
            anyhow::bail!("[assets] manifest must not be empty");
        }

        if self.dev.enabled {
            Url::parse(&self.dev.server_url).with_context(|| {
                format!(
                    "[dev] server_url is not a valid URL: {}",
                    self.dev.server_url
                )
            })?;
        }

        Ok(())
    }

    /// Get the absolute assets directory path
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(&self.assets.dir)
    }

    /// Get the manifest path relative to the assets directory
    pub fn manifest_path(&self) -> &Path {
        Path::new(&self.assets.manifest)
    }
}
