mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use pagegen_core::adapters::{FsWritePort, GoToolchain, ShellGitPort};
use pagegen_core::run_generate;
use pagegen_core::settings::DEFAULT_REFERENCE;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pagegen",
    version,
    about = "Builds and publishes the WASM example gallery for an upstream repository."
)]
struct Cli {
    /// Upstream tag or branch to clone and build.
    #[arg(long, default_value = DEFAULT_REFERENCE)]
    vers: String,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // The destination root is the directory pagegen runs in, typically the
    // checkout of the pages repository.
    let dest_root = Utf8PathBuf::from(".");
    let file_config = config::load_or_default(&dest_root).context("load pagegen.toml config")?;
    let settings = file_config.into_settings(cli.vers);

    let outcome = run_generate(&settings, &ShellGitPort, &GoToolchain, &FsWritePort)
        .context("generate example pages")?;

    info!(
        "generated {} pages at revision {}",
        outcome.generated.len(),
        outcome.revision
    );
    Ok(())
}
