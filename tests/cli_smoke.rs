use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn version_flag_prints_build_information() {
    Command::cargo_bin("termsheet")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(format!("termsheet {}", env!("CARGO_PKG_VERSION"))))
        .stdout(contains("commit:"));
}

#[test]
fn help_flag_prints_usage() {
    Command::cargo_bin("termsheet")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Usage: termsheet"))
        .stdout(contains("TERMSHEET_HOME"));
}

#[test]
fn unknown_argument_fails() {
    Command::cargo_bin("termsheet")
        .unwrap()
        .arg("--frobnicate")
        .assert()
        .code(2)
        .stderr(contains("Unknown argument: --frobnicate"));
}
