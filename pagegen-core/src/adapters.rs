//! Default subprocess- and filesystem-backed port implementations.

use crate::exec::{run_captured, run_streamed};
use crate::ports::{GitPort, WasmToolchain, WritePort};
use crate::settings::LOADER_FILE;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::process::Command;
use tracing::debug;

/// Git operations via the `git` binary on PATH.
#[derive(Debug, Clone, Default)]
pub struct ShellGitPort;

impl GitPort for ShellGitPort {
    fn clone_shallow(
        &self,
        url: &str,
        reference: &str,
        parent: &Utf8Path,
    ) -> anyhow::Result<Utf8PathBuf> {
        let mut cmd = Command::new("git");
        cmd.args(["clone", "--depth=1", "-b", reference, url])
            .current_dir(parent);
        run_streamed(&mut cmd)?;
        Ok(parent.join(repo_basename(url)))
    }

    fn describe(&self, checkout: &Utf8Path) -> anyhow::Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(["describe", "--tags", "--always"])
            .current_dir(checkout);
        let revision = run_captured(&mut cmd)?;
        Ok(revision)
    }

    fn stage(&self, repo_root: &Utf8Path, path: &Utf8Path) -> anyhow::Result<()> {
        let mut cmd = Command::new("git");
        cmd.args(["add", path.as_str()]).current_dir(repo_root);
        run_captured(&mut cmd)?;
        Ok(())
    }
}

/// Directory git creates for a clone of `url`, for both URL and
/// scp-like remote forms. One trailing `.git` is stripped, as git
/// itself does.
fn repo_basename(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed)
}

/// Go toolchain driving `go build` with a `js/wasm` target.
#[derive(Debug, Clone, Default)]
pub struct GoToolchain;

impl WasmToolchain for GoToolchain {
    fn loader_script(&self) -> anyhow::Result<Vec<u8>> {
        let goroot = goroot()?;
        // Go 1.24 moved the loader from misc/wasm to lib/wasm.
        for dir in ["misc/wasm", "lib/wasm"] {
            let path = goroot.join(dir).join(LOADER_FILE);
            if path.exists() {
                debug!("loader at {}", path);
                return fs::read(&path).with_context(|| format!("read {path}"));
            }
        }
        anyhow::bail!("{LOADER_FILE} not found under {goroot} (tried misc/wasm and lib/wasm)")
    }

    fn build(&self, checkout: &Utf8Path, package: &str, output: &Utf8Path) -> anyhow::Result<()> {
        let mut cmd = Command::new("go");
        cmd.args(["build", "-o", output.as_str()])
            .arg(format!("./{package}"))
            .current_dir(checkout)
            .env("GOOS", "js")
            .env("GOARCH", "wasm");
        if let Some(bin) = output.parent() {
            fs::create_dir_all(bin).with_context(|| format!("create {bin}"))?;
            cmd.env("GOBIN", bin);
        }
        run_streamed(&mut cmd)?;
        Ok(())
    }
}

fn goroot() -> anyhow::Result<Utf8PathBuf> {
    let mut cmd = Command::new("go");
    cmd.args(["env", "GOROOT"]);
    let out = run_captured(&mut cmd).context("query GOROOT")?;
    Ok(Utf8PathBuf::from(out))
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create parent dir for {path}"))?;
        }
        fs::write(path, contents).with_context(|| format!("write {path}"))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {path}"))
    }
}
