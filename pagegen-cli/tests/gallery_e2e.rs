//! End-to-end runs against a local upstream and a stub Go toolchain.
//!
//! The upstream is a real git repository on disk, cloned over the file://
//! transport. The `go` binary on PATH is a shell script that checks the
//! cross-compile contract and writes fake artifacts, so the whole pipeline
//! runs without a Go installation or network access.

#![cfg(unix)]
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn pagegen() -> Command {
    Command::cargo_bin("pagegen").expect("pagegen binary")
}

fn run_git(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("run git");
    assert!(status.success(), "git {args:?} failed");
}

/// Creates a tagged upstream repository with the given example packages.
fn seed_upstream(root: &Path, examples: &[&str]) {
    for name in examples {
        let dir = root.join("example").join(name);
        fs::create_dir_all(&dir).expect("create example dir");
        fs::write(dir.join("main.go"), "package main\n").expect("write main.go");
    }
    run_git(root, &["init", "-q", "-b", "main"]);
    run_git(root, &["config", "user.email", "tests@example.org"]);
    run_git(root, &["config", "user.name", "tests"]);
    run_git(root, &["add", "-A"]);
    run_git(root, &["commit", "-q", "-m", "examples"]);
    run_git(root, &["tag", "v0.3.0"]);
}

/// Creates a fake GOROOT with the loader under the given subdirectory.
fn seed_goroot(root: &Path, layout: &str) -> PathBuf {
    let dir = root.join("goroot").join(layout);
    fs::create_dir_all(&dir).expect("create goroot");
    fs::write(dir.join("wasm_exec.js"), "// loader v3\n").expect("write loader");
    root.join("goroot")
}

/// Installs a `go` shim that answers `go env GOROOT` and `go build`.
///
/// The build branch writes a fake artifact, or fails for `fail_pkg`.
fn install_go_shim(root: &Path, goroot: &Path, fail_pkg: Option<&str>) -> PathBuf {
    let shim_dir = root.join("shim");
    fs::create_dir_all(&shim_dir).expect("create shim dir");

    let fail_branch = match fail_pkg {
        Some(pkg) => {
            format!("if [ \"$4\" = \"./{pkg}\" ]; then\n  echo 'compile error' >&2\n  exit 1\nfi\n")
        }
        None => String::new(),
    };
    let script = format!(
        r#"#!/bin/sh
if [ "$1" = "env" ] && [ "$2" = "GOROOT" ]; then
  echo "{goroot}"
  exit 0
fi
if [ "$1" = "build" ] && [ "$2" = "-o" ]; then
  if [ "$GOOS" != "js" ] || [ "$GOARCH" != "wasm" ]; then
    echo "expected GOOS=js GOARCH=wasm" >&2
    exit 1
  fi
{fail_branch}  mkdir -p "$(dirname "$3")"
  printf 'wasm built from %s' "$4" > "$3"
  exit 0
fi
echo "unexpected go invocation: $*" >&2
exit 1
"#,
        goroot = goroot.display(),
    );
    let path = shim_dir.join("go");
    fs::write(&path, script).expect("write shim");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod shim");
    shim_dir
}

/// Initializes the destination as a git repository, as the pages checkout
/// would be.
fn seed_dest(root: &Path) {
    fs::create_dir_all(root).expect("create dest");
    run_git(root, &["init", "-q", "-b", "main"]);
}

fn shim_path(shim_dir: &Path) -> String {
    let path = std::env::var("PATH").unwrap_or_default();
    format!("{}:{}", shim_dir.display(), path)
}

fn read_string(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

fn staged_status(dir: &Path) -> String {
    let out = std::process::Command::new("git")
        .args(["status", "--porcelain"])
        .current_dir(dir)
        .output()
        .expect("git status");
    String::from_utf8(out.stdout).expect("utf8 status")
}

#[test]
fn test_generates_the_gallery_end_to_end() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();

    let upstream = root.join("upstream");
    fs::create_dir_all(&upstream).expect("create upstream");
    seed_upstream(&upstream, &["bezier", "anim", "sketch"]);
    let goroot = seed_goroot(root, "misc/wasm");
    let shim_dir = install_go_shim(root, &goroot, None);
    let dest = root.join("site");
    seed_dest(&dest);

    fs::write(
        dest.join("pagegen.toml"),
        format!("upstream = \"file://{}\"\n", upstream.display()),
    )
    .expect("write config");

    pagegen()
        .current_dir(&dest)
        .env("PATH", shim_path(&shim_dir))
        .env("RUST_LOG", "info")
        .arg("--vers")
        .arg("v0.3.0")
        .assert()
        .success()
        .stdout(predicate::str::contains("ignoring sketch"))
        .stdout(predicate::str::contains("generating example/anim"));

    assert_eq!(
        read_string(&dest.join("assets").join("wasm_exec.js")),
        "// loader v3\n"
    );

    let page = read_string(&dest.join("example").join("anim").join("index.html"));
    assert!(page.contains("Go-P5: anim"));
    assert!(page.contains("https://go-p5.github.io/example/anim/anim.wasm"));
    assert!(page.contains("https://go-p5.github.io/assets/wasm_exec.js"));

    assert_eq!(
        read_string(&dest.join("example").join("anim").join("anim.wasm")),
        "wasm built from ./example/anim"
    );
    assert!(!dest.join("example").join("sketch").exists());

    let index = read_string(&dest.join("index.html"));
    assert!(index.contains("(version=v0.3.0)"));
    let anim = index.find(">anim<").expect("anim item");
    let bezier = index.find(">bezier<").expect("bezier item");
    assert!(anim < bezier, "items out of order");
    assert!(!index.contains("sketch"));

    let status = staged_status(&dest);
    assert!(status.contains("A  example/anim/anim.wasm"), "{status}");
    assert!(status.contains("A  example/bezier/bezier.wasm"), "{status}");
}

#[test]
fn test_finds_the_loader_in_the_new_goroot_layout() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();

    let upstream = root.join("upstream");
    fs::create_dir_all(&upstream).expect("create upstream");
    seed_upstream(&upstream, &["anim"]);
    let goroot = seed_goroot(root, "lib/wasm");
    let shim_dir = install_go_shim(root, &goroot, None);
    let dest = root.join("site");
    seed_dest(&dest);

    fs::write(
        dest.join("pagegen.toml"),
        format!("upstream = \"file://{}\"\n", upstream.display()),
    )
    .expect("write config");

    pagegen()
        .current_dir(&dest)
        .env("PATH", shim_path(&shim_dir))
        .arg("--vers")
        .arg("v0.3.0")
        .assert()
        .success();

    assert_eq!(
        read_string(&dest.join("assets").join("wasm_exec.js")),
        "// loader v3\n"
    );
}

#[test]
fn test_failed_build_leaves_partial_output_unindexed() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();

    let upstream = root.join("upstream");
    fs::create_dir_all(&upstream).expect("create upstream");
    seed_upstream(&upstream, &["anim", "bezier"]);
    let goroot = seed_goroot(root, "misc/wasm");
    let shim_dir = install_go_shim(root, &goroot, Some("example/bezier"));
    let dest = root.join("site");
    seed_dest(&dest);

    fs::write(
        dest.join("pagegen.toml"),
        format!("upstream = \"file://{}\"\n", upstream.display()),
    )
    .expect("write config");

    pagegen()
        .current_dir(&dest)
        .env("PATH", shim_path(&shim_dir))
        .env("RUST_LOG", "info")
        .arg("--vers")
        .arg("v0.3.0")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("build example/bezier"));

    // anim's artifact is in place and staged; the index never appears.
    assert!(dest.join("example").join("anim").join("anim.wasm").exists());
    assert!(!dest.join("index.html").exists());

    let status = staged_status(&dest);
    assert!(status.contains("A  example/anim/anim.wasm"), "{status}");
    assert!(!status.contains("bezier.wasm"), "{status}");
}
