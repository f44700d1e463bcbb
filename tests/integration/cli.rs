//! Command-line surface of the binary
//!
//! Only paths that stop before any network call are exercised here.

use assert_cmd::Command;
use predicates::prelude::*;

fn command(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("readme-disclaimer").unwrap();
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_ACCOUNT")
        .env("HOME", home)
        .current_dir(home);
    cmd
}

#[test]
fn test_print_example_config() {
    let home = tempfile::tempdir().unwrap();

    command(home.path())
        .arg("--print-example-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[messages]"))
        .stdout(predicate::str::contains("api_base_url"));
}

#[test]
fn test_missing_token_fails_before_running() {
    let home = tempfile::tempdir().unwrap();

    command(home.path())
        .args(["--account", "octocat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing access token"));

    // Logging starts only after the config is valid
    assert!(!home.path().join("readme-disclaimer.log").exists());
}

#[test]
fn test_missing_account_fails_before_running() {
    let home = tempfile::tempdir().unwrap();

    command(home.path())
        .env("GITHUB_TOKEN", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing account name"));
}

#[test]
fn test_unreadable_config_file_fails() {
    let home = tempfile::tempdir().unwrap();

    command(home.path())
        .args(["--config", "does-not-exist.toml", "--account", "octocat"])
        .env("GITHUB_TOKEN", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
