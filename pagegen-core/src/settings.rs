//! Clap-free settings for the generate pipeline.

use camino::Utf8PathBuf;
use std::collections::BTreeSet;

/// Upstream repository cloned when none is configured.
pub const DEFAULT_UPSTREAM: &str = "https://github.com/go-p5/p5";

/// Branch built when no version is given.
pub const DEFAULT_REFERENCE: &str = "main";

/// Base URL the generated pages are served under, without a trailing slash.
pub const DEFAULT_BASE_URL: &str = "https://go-p5.github.io";

/// Display name used in page titles and the index heading.
pub const DEFAULT_SITE_NAME: &str = "Go-P5";

/// Example directories never built or linked.
pub const DEFAULT_EXCLUDES: &[&str] = &["sketch", "wasm-p5-ex"];

/// File name of the toolchain's JS loader, published under `assets/`.
pub const LOADER_FILE: &str = "wasm_exec.js";

/// Settings for one generate run.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Upstream repository holding the `example/` tree.
    pub upstream: String,

    /// Branch or tag of the upstream to clone.
    pub reference: String,

    /// Base URL of the published site, without a trailing slash.
    pub base_url: String,

    /// Display name for titles and the index heading.
    pub site_name: String,

    /// Directory the pages and artifacts are written into; expected to be
    /// the root of the site's git checkout.
    pub dest_root: Utf8PathBuf,

    /// Example names to skip.
    pub exclude: BTreeSet<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            upstream: DEFAULT_UPSTREAM.to_string(),
            reference: DEFAULT_REFERENCE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            dest_root: Utf8PathBuf::from("."),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
