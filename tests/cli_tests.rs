//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `wily` running inside `workdir` with `HOME` pointed at `home`.
fn wily(workdir: &Path, home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wily"));
    cmd.current_dir(workdir).env("HOME", home).env("USERPROFILE", home).env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run wily");
    assert!(output.status.success(), "wily failed: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wily"));
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("wily"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wily"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("cache-path"))
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn test_show_defaults_without_config_file() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");

    wily(work.path(), home.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Path: ."))
        .stdout(predicate::str::contains("Archiver: git"))
        .stdout(predicate::str::contains("Operators: cyclomatic, halstead, maintainability, raw"))
        .stdout(predicate::str::contains("Max revisions: 50"));
}

#[test]
fn test_show_reads_wily_cfg_from_working_directory() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");
    fs::write(work.path().join("wily.cfg"), "[wily]\nmax_revisions = 10\n").expect("write cfg");

    wily(work.path(), home.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Max revisions: 10"))
        .stdout(predicate::str::contains("Archiver: git"));
}

#[test]
fn test_show_json_with_explicit_config() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");
    let cfg = work.path().join("custom.cfg");
    fs::write(&cfg, "[wily]\noperators = raw, halstead\ninclude_ipynb = false\n").expect("write");

    let stdout = stdout_of(wily(work.path(), home.path()).args([
        "--config",
        cfg.to_str().expect("utf8 path"),
        "show",
        "--format",
        "json",
    ]));
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("json report");

    assert_eq!(report["operators"], serde_json::json!(["halstead", "raw"]));
    assert_eq!(report["include_ipynb"], false);
    assert_eq!(report["ipynb_cells"], true);
    assert_eq!(report["max_revisions"], 50);
    assert_eq!(report["targets"], serde_json::json!(["."]));
    let cache = report["cache_path"].as_str().expect("cache path");
    assert!(Path::new(cache).starts_with(home.path().join(".wily")), "cache at {cache}");
}

#[test]
fn test_malformed_config_fails() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");
    fs::write(work.path().join("wily.cfg"), "[wily]\nmax_revisions = notanumber\n")
        .expect("write cfg");

    wily(work.path(), home.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_revisions"));
}

#[test]
fn test_path_override_resets_targets() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");

    let stdout = stdout_of(wily(work.path(), home.path()).args([
        "--path", "project", "show", "--format", "json",
    ]));
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("json report");
    assert_eq!(report["path"], "project");
    assert_eq!(report["targets"], serde_json::json!(["project"]));
}

#[test]
fn test_cache_path_is_stable_and_fingerprinted() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");

    let first = stdout_of(wily(work.path(), home.path()).arg("cache-path"));
    let second = stdout_of(wily(work.path(), home.path()).arg("cache-path"));
    assert_eq!(first, second);

    let cache = Path::new(first.trim());
    assert_eq!(cache.parent(), Some(home.path().join(".wily").as_path()));
    let name = cache.file_name().and_then(|n| n.to_str()).expect("fingerprint");
    assert_eq!(name.len(), 9);
    assert!(!cache.exists(), "cache-path must not create the directory");
}

#[test]
fn test_cache_path_differs_per_target() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");

    let a = stdout_of(wily(work.path(), home.path()).args(["--path", "a", "cache-path"]));
    let b = stdout_of(wily(work.path(), home.path()).args(["--path", "b", "cache-path"]));
    assert_ne!(a, b);
}

#[test]
fn test_cache_override() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");
    let custom = work.path().join("my-cache");

    wily(work.path(), home.path())
        .args(["--cache", custom.to_str().expect("utf8 path"), "cache-path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("my-cache"));
}

#[test]
fn test_clean_removes_cache_directory() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");

    let cache = stdout_of(wily(work.path(), home.path()).arg("cache-path"));
    let cache = Path::new(cache.trim()).to_path_buf();
    fs::create_dir_all(&cache).expect("create cache");
    fs::write(cache.join("index.json"), "[]").expect("write index");

    wily(work.path(), home.path())
        .args(["clean", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed wily cache"));
    assert!(!cache.exists());
}

#[test]
fn test_clean_without_cache_is_a_noop() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");

    wily(work.path(), home.path())
        .args(["clean", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to clean"));
}

#[test]
fn test_rust_log_sets_level_without_debug_flag() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");

    wily(work.path(), home.path())
        .env("RUST_LOG", "debug")
        .arg("show")
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not locate"));
}

#[test]
fn test_default_log_level_hides_debug_output() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");

    wily(work.path(), home.path())
        .arg("show")
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not locate").not());
}

#[test]
fn test_trailing_slash_shares_cache_path() {
    let work = TempDir::new().expect("work dir");
    let home = TempDir::new().expect("home dir");

    let plain = stdout_of(wily(work.path(), home.path()).args(["--path", "src", "cache-path"]));
    let slashed = stdout_of(wily(work.path(), home.path()).args(["--path", "src/", "cache-path"]));
    assert_eq!(plain, slashed);
}
