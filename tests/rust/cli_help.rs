use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn cli_prints_help() {
    let mut cmd = Command::cargo_bin("musmcp").expect("binary not found");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("musmcp"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("kick"));
}
