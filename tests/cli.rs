//! Integration tests for the `grafana_msi` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Command running in an empty directory, isolated from the caller's
/// configuration.
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("grafana_msi").expect("Failed to locate grafana_msi binary");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("GRAFANA_MSI_CONFIG")
        .env_remove("WIX_HOME")
        .env_remove("WINE_CMD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_flags() {
    let tmp = TempDir::new().unwrap();
    cli(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--build"))
        .stdout(predicate::str::contains("--enterprise"))
        .stdout(predicate::str::contains("--wix-home"));
}

#[test]
fn no_archive_and_no_build_fails() {
    let tmp = TempDir::new().unwrap();
    cli(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no release archive found"));
}

#[test]
fn enterprise_detection_ignores_standard_archives() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("dist")).unwrap();
    std::fs::write(tmp.path().join("dist/grafana-6.0.0.windows-amd64.zip"), "").unwrap();

    cli(tmp.path())
        .arg("--enterprise")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no release archive found"))
        .stderr(predicate::str::contains("enterprise-dist"));
}

#[test]
fn missing_wix_fails_before_downloading() {
    let tmp = TempDir::new().unwrap();
    cli(tmp.path())
        .args(["--build", "6.0.0-ca0bc2c5pre3", "--wix-home", "no-wix-here", "--wine", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Version: 6.0.0-ca0bc2c5pre3"))
        .stderr(predicate::str::contains("Hash: ca0bc2c5pre3"))
        .stderr(predicate::str::contains("heat.exe not found"));

    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn invalid_build_is_rejected() {
    let tmp = TempDir::new().unwrap();
    cli(tmp.path())
        .args(["--build", "latest"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid release version"));
}

#[test]
fn unknown_config_key_is_rejected() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("grafana-msi.toml"), "[paths]\ndsit = \"dist\"\n").unwrap();

    cli(tmp.path())
        .args(["--config", "grafana-msi.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration"));
}
