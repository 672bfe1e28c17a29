//! The generate pipeline: clone, cross-compile, publish.
//!
//! The entry point is I/O-agnostic: subprocesses and destination writes go
//! through the port traits, so the whole flow is testable without a
//! network, a git remote, or a Go toolchain.

use crate::ports::{GitPort, WasmToolchain, WritePort};
use crate::settings::{LOADER_FILE, SiteSettings};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use pagegen_render::{IndexPage, example_page};
use tracing::{debug, info};

/// Subdirectory of the checkout that holds the example packages, mirrored
/// under the destination root.
pub const EXAMPLE_DIR: &str = "example";

/// Outcome of a successful generate run.
#[derive(Debug)]
pub struct SiteOutcome {
    /// Revision string reported by the checkout.
    pub revision: String,
    /// Example names built and linked, in index order.
    pub generated: Vec<String>,
}

/// Run one clone/build/publish pass.
///
/// Fails on the first error. Pages and artifacts written for earlier
/// examples stay in place and staged, but the index is only written once
/// every example has succeeded. The scratch directory is removed on every
/// exit path.
pub fn run_generate(
    settings: &SiteSettings,
    git: &dyn GitPort,
    toolchain: &dyn WasmToolchain,
    writer: &dyn WritePort,
) -> anyhow::Result<SiteOutcome> {
    let scratch = tempfile::Builder::new()
        .prefix("pagegen-")
        .tempdir()
        .context("create scratch dir")?;
    let work = Utf8Path::from_path(scratch.path())
        .ok_or_else(|| anyhow::anyhow!("scratch dir is not UTF-8: {}", scratch.path().display()))?
        .to_path_buf();

    let checkout = git
        .clone_shallow(&settings.upstream, &settings.reference, &work)
        .with_context(|| format!("clone {} at {}", settings.upstream, settings.reference))?;

    let revision = git
        .describe(&checkout)
        .context("resolve upstream revision")?;
    info!("revision: {:?}", revision);

    let mut index = IndexPage::new(&settings.site_name, &revision);

    let loader = toolchain.loader_script().context("locate WASM loader")?;
    writer.create_dir_all(&settings.dest_root.join("assets"))?;
    writer.write_file(
        &settings.dest_root.join("assets").join(LOADER_FILE),
        &loader,
    )?;
    let loader_url = format!("{}/assets/{}", settings.base_url, LOADER_FILE);

    let names = list_examples(&checkout)?;
    for name in &names {
        debug!(">>> {}", name);
    }

    let bin_dir = work.join("bin");
    let mut generated = Vec::new();
    for name in names {
        if settings.exclude.contains(&name) {
            info!("ignoring {}...", name);
            continue;
        }
        let package = format!("{EXAMPLE_DIR}/{name}");
        info!("generating {}...", package);

        let artifact = format!("{name}.wasm");
        toolchain
            .build(&checkout, &package, &bin_dir.join(&artifact))
            .with_context(|| format!("build {package}"))?;

        let page_rel = Utf8PathBuf::from(EXAMPLE_DIR).join(&name);
        let page_dir = settings.dest_root.join(&page_rel);
        writer.create_dir_all(&page_dir)?;

        let title = format!("{}: {}", settings.site_name, name);
        let wasm_url = format!("{}/{}/{}/{}", settings.base_url, EXAMPLE_DIR, name, artifact);
        let page = example_page(&title, &wasm_url, &loader_url);
        writer.write_file(&page_dir.join("index.html"), page.as_bytes())?;

        let wasm = fs::read(bin_dir.join(&artifact))
            .with_context(|| format!("read built artifact for {package}"))?;
        let artifact_rel = page_rel.join(&artifact);
        writer.write_file(&settings.dest_root.join(&artifact_rel), &wasm)?;

        git.stage(&settings.dest_root, &artifact_rel)
            .with_context(|| format!("stage {artifact_rel}"))?;

        let href = format!("{}/{}/{}/index.html", settings.base_url, EXAMPLE_DIR, name);
        index.push_example(&name, &href);
        generated.push(name);
    }

    writer.write_file(
        &settings.dest_root.join("index.html"),
        index.finish().as_bytes(),
    )?;

    Ok(SiteOutcome {
        revision,
        generated,
    })
}

/// Immediate subdirectories of the checkout's example folder, sorted by
/// name. Stray files in the folder are not examples.
fn list_examples(checkout: &Utf8Path) -> anyhow::Result<Vec<String>> {
    let dir = checkout.join(EXAMPLE_DIR);
    let mut out = Vec::new();
    for entry in fs::read_dir(dir.as_std_path()).with_context(|| format!("read {dir}"))? {
        let entry = entry.with_context(|| format!("read entry in {dir}"))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("inspect {}", entry.path().display()))?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry
            .file_name()
            .into_string()
            .map_err(|name| anyhow::anyhow!("non-UTF-8 example name {:?}", name))?;
        out.push(name);
    }
    out.sort();
    Ok(out)
}
