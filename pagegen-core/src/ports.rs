//! Port traits abstracting all I/O away from the pipeline.

use camino::{Utf8Path, Utf8PathBuf};

/// Git operations (shallow clone, describe, staging).
pub trait GitPort {
    /// Shallow-clone `reference` of `url` under `parent`, returning the
    /// checkout directory. The child's stdio passes through to the
    /// terminal.
    fn clone_shallow(
        &self,
        url: &str,
        reference: &str,
        parent: &Utf8Path,
    ) -> anyhow::Result<Utf8PathBuf>;

    /// Human-readable revision of the checkout (`git describe` style).
    fn describe(&self, checkout: &Utf8Path) -> anyhow::Result<String>;

    /// Stage `path` (relative to `repo_root`) for the next commit.
    fn stage(&self, repo_root: &Utf8Path, path: &Utf8Path) -> anyhow::Result<()>;
}

/// Toolchain that cross-compiles examples for the browser.
pub trait WasmToolchain {
    /// The JS loader shipped with the toolchain, required by the generated
    /// pages to instantiate and run artifacts.
    fn loader_script(&self) -> anyhow::Result<Vec<u8>>;

    /// Build `package` (a path relative to `checkout`) into `output`.
    fn build(&self, checkout: &Utf8Path, package: &str, output: &Utf8Path) -> anyhow::Result<()>;
}

/// File-system write operations on the destination tree.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
