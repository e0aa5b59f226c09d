use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_searchpilot_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("searchpilot")
}

#[test]
fn test_main_help_lists_commands() {
    let mut cmd = Command::new(get_searchpilot_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_serve_help_mentions_api_key_env() {
    let mut cmd = Command::new(get_searchpilot_bin());
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PAGESPEED_API_KEY"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("[default: 5000]"));
}

#[test]
fn test_analyze_requires_url() {
    let mut cmd = Command::new(get_searchpilot_bin());
    cmd.arg("analyze");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_analyze_rejects_blank_url() {
    let mut cmd = Command::new(get_searchpilot_bin());
    cmd.arg("analyze").arg("   ");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("URL must not be empty"));
}

#[test]
fn test_analyze_rejects_unknown_strategy() {
    let mut cmd = Command::new(get_searchpilot_bin());
    cmd.arg("analyze")
        .arg("https://example.com")
        .arg("--strategy")
        .arg("tablet");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid strategy"));
}

#[test]
fn test_watch_quits_on_command() {
    let mut cmd = Command::new(get_searchpilot_bin());
    cmd.arg("watch").write_stdin("help\nq\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SearchPilot watch"))
        .stdout(predicate::str::contains("toggle the strategy"));
}

#[test]
fn test_watch_ends_on_closed_stdin() {
    let mut cmd = Command::new(get_searchpilot_bin());
    cmd.arg("watch").write_stdin("");

    cmd.assert().success();
}

#[test]
fn test_watch_retry_needs_url() {
    let mut cmd = Command::new(get_searchpilot_bin());
    cmd.arg("watch").write_stdin("r\nq\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Enter a URL first"));
}
