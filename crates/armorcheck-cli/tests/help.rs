use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn armorcheck_cmd() -> Command {
    Command::cargo_bin("armorcheck").expect("armorcheck binary")
}

#[test]
fn help_works() {
    armorcheck_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("explain"));
}

#[test]
fn verify_help_lists_inputs() {
    armorcheck_cmd()
        .args(["verify", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--suite"))
        .stdout(predicate::str::contains("--outputs"))
        .stdout(predicate::str::contains("--fixtures"));
}

#[test]
fn verify_requires_a_suite() {
    armorcheck_cmd()
        .arg("verify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--suite"));
}
