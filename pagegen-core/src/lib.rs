//! Embeddable core library for pagegen.
//!
//! Provides a clap-free, I/O-abstracted pipeline that shallow-clones an
//! upstream examples repository, cross-compiles each example to WASM, and
//! writes the static pages of the published gallery.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`GitPort`](ports::GitPort) — clone, describe, and stage via git
//! - [`WasmToolchain`](ports::WasmToolchain) — locate the JS loader and build artifacts
//! - [`WritePort`](ports::WritePort) — write files and create directories
//!
//! The [`adapters`] module provides default subprocess- and
//! filesystem-backed implementations.
//!
//! # Entry point
//!
//! - [`run_generate`](pipeline::run_generate) — one full clone/build/publish pass

pub mod adapters;
pub mod exec;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use pipeline::{SiteOutcome, run_generate};
pub use settings::SiteSettings;
