use assert_cmd::Command;
use predicates::prelude::*;

/// Tools which fail loudly if they are ever invoked.
fn deploy() -> Command {
    let mut command = Command::cargo_bin("deploy").unwrap();
    command.env("HELM_BIN", "false").env("KUBECTL_BIN", "false");
    command
}

#[test]
fn unknown_flag_exits_one() {
    deploy()
        .arg("-x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("-x"));
}

#[test]
fn unknown_flag_after_valid_ones_exits_one() {
    deploy()
        .args(["-e", "staging", "-p", "--bogus"])
        .assert()
        .code(1);
}

#[test]
fn missing_flag_value_exits_one() {
    deploy().arg("-e").assert().code(1);
}

#[test]
fn help_exits_zero() {
    deploy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--namespace-prefix"));
}

#[test]
fn release_rejects_bad_version() {
    Command::cargo_bin("release")
        .unwrap()
        .args(["--version", "not-a-version"])
        .assert()
        .code(1);
}

#[test]
fn release_rejects_unknown_step() {
    Command::cargo_bin("release")
        .unwrap()
        .args(["--version", "1.0.0", "--from-step", "storage"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("storage"));
}
