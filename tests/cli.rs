mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestEnv;
use predicates::str::contains;

#[test]
fn help_lists_every_flag_and_succeeds() {
    let mut cmd = cargo_bin_cmd!("bwlsync");
    let assert = cmd.arg("-h").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for flag in ["-d", "-f", "-t", "-s", "-l", "-r", "-n", "<USER>", "<PASSWORD>", "<ACCOUNT>"] {
        assert!(out.contains(flag), "help is missing {}", flag);
    }
}

#[test]
fn missing_positionals_is_a_usage_error() {
    cargo_bin_cmd!("bwlsync")
        .args(["alice", "secret"])
        .assert()
        .code(1)
        .stderr(contains("Usage"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    cargo_bin_cmd!("bwlsync")
        .args(["alice", "secret", "acme", "-x"])
        .assert()
        .code(1);
}

#[test]
fn flag_without_argument_is_a_usage_error() {
    cargo_bin_cmd!("bwlsync")
        .args(["alice", "secret", "acme", "-d"])
        .assert()
        .code(1);
}

#[test]
fn unparseable_cursor_file_fails_before_network() {
    let env = TestEnv::new();
    let from = env.write("from.txt", "not-a-date");
    // Nothing listens on the discard port; the cursor error must come first.
    env.cmd("http://127.0.0.1:9")
        .arg("-f")
        .arg(&from)
        .assert()
        .code(1)
        .stderr(contains("ERROR"))
        .stderr(contains("invalid date"));
    assert!(!env.timestamp.exists());
}

#[test]
fn unreachable_server_is_fatal() {
    let env = TestEnv::new();
    env.cmd("http://127.0.0.1:9")
        .assert()
        .code(1)
        .stderr(contains("ERROR: error calling the Blueworks Live REST API"));
    assert!(!env.timestamp.exists());
}

#[test]
fn invalid_server_url_is_a_config_error() {
    let env = TestEnv::new();
    env.cmd("not a url")
        .assert()
        .code(1)
        .stderr(contains("invalid server url"));
}
