//! Integration tests for the `overlay-proxy` binary.
//! None of these need a container daemon: bodies either opt out of the
//! overlay network or are rejected before any lookup, and the daemon
//! connection is only made on first use.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn overlay_proxy() -> Command {
    let mut cmd = Command::cargo_bin("overlay-proxy").unwrap();
    cmd.env_remove("OVERLAY_PROXY_CONFIG")
        .env("DOCKER_HOST", "unix:///nonexistent/overlay-proxy.sock")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_check_fixture_config() {
    overlay_proxy()
        .args(["--config", "tests/fixtures/proxy.yaml", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"))
        .stdout(predicate::str::contains("/var/lib/overlay/wait"))
        .stdout(predicate::str::contains("com.example.hostname"))
        .stdout(predicate::str::contains("10.1.42.1"));
}

#[test]
fn test_check_rejects_invalid_config() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.yaml");
    std::fs::write(&path, "docker_bridge_ip: nope\n").unwrap();

    overlay_proxy()
        .arg("--config")
        .arg(&path)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("docker_bridge_ip"));
}

#[test]
fn test_init_then_check() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.yaml");

    overlay_proxy()
        .arg("init")
        .arg("--output")
        .arg(&path)
        .assert()
        .success();
    assert!(path.is_file());

    overlay_proxy()
        .arg("--config")
        .arg(&path)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("weavewait"));

    // A second init leaves the file alone.
    std::fs::write(&path, "helper_volume: mine\n").unwrap();
    overlay_proxy()
        .arg("init")
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "helper_volume: mine\n");
}

#[test]
fn test_transform_passes_through_opted_out_body() {
    let body = "{\"Image\": \"busybox\", \"HostConfig\": {\"NetworkMode\": \"host\"}}\n";

    overlay_proxy()
        .args(["--config", "tests/fixtures/proxy.yaml", "transform", "--name", "web1"])
        .write_stdin(body)
        .assert()
        .success()
        .stdout(body)
        .stderr(predicate::str::contains("Leaving container alone"));
}

#[test]
fn test_transform_rejects_malformed_body() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("body.json");
    std::fs::write(&input, "not json").unwrap();

    overlay_proxy()
        .args(["--config", "tests/fixtures/proxy.yaml", "transform", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 400"));
}
