//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn keeper() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("context-keeper"))
}

/// Write a minimal config plus one persisted domain list into `tmp`.
fn write_fixture(tmp: &TempDir) {
    fs::write(
        tmp.path().join("context-keeper.toml"),
        r#"
data_dir = "data"
contexts_dir = "contexts"
sync_target = "site"

[[domain]]
name = "astronomy"
description = "Astronomy libraries"
keywords = ["astronomy"]
pinned = ["astropy/astropy"]
"#,
    )
    .expect("write config");

    fs::create_dir_all(tmp.path().join("data")).expect("data dir");
    fs::write(
        tmp.path().join("data/astronomy.json"),
        r#"{
  "libraries": [
    {"name": "c/low", "github_url": "https://github.com/c/low", "stars": 10, "rank": 9},
    {"name": "a/top", "github_url": "https://github.com/a/top", "stars": 100, "rank": 9,
     "hasContextFile": true, "contextFileName": "top-context.txt"}
  ],
  "domain": "astronomy",
  "description": "Astronomy libraries",
  "keywords": ["astronomy"]
}"#,
    )
    .expect("write domain file");

    fs::create_dir_all(tmp.path().join("contexts")).expect("contexts dir");
    fs::write(tmp.path().join("contexts/top-context.txt"), "context text").expect("write context");
}

#[test]
fn test_cli_version() {
    let mut cmd = keeper();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("context-keeper"));
}

#[test]
fn test_cli_help_lists_subcommands() {
    let mut cmd = keeper();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("rank"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("maintain"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn test_update_requires_configured_domains() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = keeper();
    cmd.current_dir(tmp.path()).arg("update");
    cmd.assert().failure().stderr(predicate::str::contains("No domains configured"));
}

#[test]
fn test_rank_rejects_unknown_domain() {
    let tmp = TempDir::new().expect("tmp");
    write_fixture(&tmp);
    let mut cmd = keeper();
    cmd.current_dir(tmp.path()).args(["rank", "--domain", "biology"]);
    cmd.assert().failure().stderr(predicate::str::contains("Unknown domain"));
}

#[test]
fn test_rank_reorders_and_keeps_pinned() {
    let tmp = TempDir::new().expect("tmp");
    write_fixture(&tmp);

    let mut cmd = keeper();
    cmd.current_dir(tmp.path()).args(["rank", "--domain", "astronomy"]);
    cmd.assert().success().stdout(predicate::str::contains("3 processed"));

    let raw = fs::read_to_string(tmp.path().join("data/astronomy.json")).expect("read");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("json");
    let libs = parsed["libraries"].as_array().expect("libraries");

    // Re-ranked by stars descending; pinned astropy/astropy materialized last.
    assert_eq!(libs[0]["name"], "a/top");
    assert_eq!(libs[0]["rank"], 1);
    assert_eq!(libs[0]["hasContextFile"], true);
    assert_eq!(libs[1]["name"], "c/low");
    assert_eq!(libs[1]["rank"], 2);
    assert_eq!(libs[2]["name"], "astropy/astropy");
    assert_eq!(libs[2]["stars"], 0);
}

#[test]
fn test_info_reports_statistics() {
    let tmp = TempDir::new().expect("tmp");
    write_fixture(&tmp);

    let mut cmd = keeper();
    cmd.current_dir(tmp.path()).arg("info");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Domain: astronomy"))
        .stdout(predicate::str::contains("Libraries: 2"))
        .stdout(predicate::str::contains("Context files: 1/2"));
}

#[test]
fn test_info_without_data_file() {
    let tmp = TempDir::new().expect("tmp");
    write_fixture(&tmp);
    fs::remove_file(tmp.path().join("data/astronomy.json")).expect("remove");

    let mut cmd = keeper();
    cmd.current_dir(tmp.path()).arg("info");
    cmd.assert().success().stdout(predicate::str::contains("No persisted data"));
}

#[test]
fn test_sync_copies_data_and_contexts() {
    let tmp = TempDir::new().expect("tmp");
    write_fixture(&tmp);

    let mut cmd = keeper();
    cmd.current_dir(tmp.path()).arg("sync");
    cmd.assert().success().stdout(predicate::str::contains("2 processed"));

    assert!(tmp.path().join("site/astronomy.json").exists());
    assert!(tmp.path().join("site/contexts/top-context.txt").exists());
}

#[test]
fn test_sync_without_target_fails() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(
        tmp.path().join("context-keeper.toml"),
        "[[domain]]\nname = \"astronomy\"\n",
    )
    .expect("write config");

    let mut cmd = keeper();
    cmd.current_dir(tmp.path()).arg("sync");
    cmd.assert().failure().stderr(predicate::str::contains("No sync target configured"));
}

#[test]
fn test_explicit_bad_config_fails() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("bad.toml"), "data_dir = 123\n").expect("write");

    let mut cmd = keeper();
    cmd.current_dir(tmp.path()).args(["--config", "bad.toml", "info"]);
    cmd.assert().failure().stderr(predicate::str::contains("Invalid TOML config"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = keeper();
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("context-keeper"));
}
