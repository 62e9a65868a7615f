//! Integration tests for the rescache binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn rescache(cache_dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("rescache"));
    cmd.env_remove("RESCACHE_SETTINGS")
        .env_remove("RESCACHE_TIMEOUT")
        .env("RESCACHE_CACHE_DIR", cache_dir.path());
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("rescache"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Local on-disk cache"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("rescache"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_get_fetches_once() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/groups/osi.json");
        then.status(200).body("{\"MIT\": {}}");
    });
    let temp = TempDir::new()?;
    let template = server.url("/groups/{}.json");

    for _ in 0..2 {
        rescache(&temp)
            .args(["get", template.as_str(), "osi"])
            .assert()
            .success()
            .stdout("{\"MIT\": {}}");
    }

    mock.assert_calls(1);
    Ok(())
}

#[test]
fn cli_get_bad_response_fails() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/groups/all.jso");
        then.status(404);
    });
    let temp = TempDir::new()?;

    rescache(&temp)
        .args(["get", server.url("/groups/{}.jso").as_str(), "all"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("404"));
    Ok(())
}

#[test]
fn cli_get_unreachable_exits_2() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    rescache(&temp)
        .args(["get", "http://127.0.0.1:1/{}", "all"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn cli_path_leaves_cache_dir_alone() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let root = temp.path().join("fresh");

    rescache(&temp)
        .args(["path", "https://example.com/{}.json", "all", "--cache-dir"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains(root.display().to_string()));

    assert!(!root.exists());
    Ok(())
}

#[test]
fn cli_path_and_remove() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let template = "https://example.com/groups/{}.json";

    rescache(&temp)
        .args(["path", template, "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target: https://example.com/groups/all.json"))
        .stdout(predicate::str::contains("Status").not());

    rescache(&temp)
        .args(["remove", template, "all"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cache entry not found"));

    rescache(&temp)
        .args(["remove", template])
        .assert()
        .success()
        .stdout("Removed 0 entries\n");
    Ok(())
}

#[test]
fn cli_rejects_template_without_placeholder() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    rescache(&temp)
        .args(["list", "https://example.com/all.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("placeholder"));
    Ok(())
}

#[test]
fn cli_convert_yaml_to_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let input = temp.path().join("index.yml");
    let output = temp.path().join("index.json");
    fs::write(&input, "- path: file1\n  name: dst1\n")?;

    rescache(&temp)
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(json[0]["name"], "dst1");
    Ok(())
}
