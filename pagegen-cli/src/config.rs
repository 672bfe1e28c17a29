//! Configuration file loading for pagegen.
//!
//! Discovers and loads `pagegen.toml` from the destination root. Every
//! field is optional; missing fields fall back to the go-p5 defaults.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use pagegen_core::SiteSettings;
use pagegen_core::settings::{
    DEFAULT_BASE_URL, DEFAULT_EXCLUDES, DEFAULT_SITE_NAME, DEFAULT_UPSTREAM,
};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "pagegen.toml";

/// Top-level configuration from pagegen.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Git URL of the repository holding the examples.
    pub upstream: String,

    /// Base URL the published pages are served from.
    pub base_url: String,

    /// Display name used in page titles and the index heading.
    pub site_name: String,

    /// Example directories to skip. Replaces the default list when set.
    pub exclude: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            upstream: DEFAULT_UPSTREAM.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SiteConfig {
    /// Build run settings from this config plus the reference given on the
    /// command line.
    pub fn into_settings(self, reference: String) -> SiteSettings {
        SiteSettings {
            upstream: self.upstream,
            reference,
            base_url: self.base_url,
            site_name: self.site_name,
            exclude: self.exclude.into_iter().collect(),
            ..SiteSettings::default()
        }
    }
}

/// Discover the pagegen.toml config file.
///
/// Searches the destination root directory. Returns `None` if no config
/// file is found.
pub fn discover_config(dest_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dest_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a pagegen.toml config file.
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<SiteConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<SiteConfig> {
    let config: SiteConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the destination root, or return defaults if not found.
pub fn load_or_default(dest_root: &Utf8Path) -> anyhow::Result<SiteConfig> {
    match discover_config(dest_root) {
        Some(path) => load_config(&path),
        None => Ok(SiteConfig::default()),
    }
}
