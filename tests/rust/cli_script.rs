use assert_cmd::Command;
use predicates::prelude::*;

fn musmcp(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("musmcp").expect("binary not found");
    cmd.current_dir(dir);
    cmd
}

#[test]
fn cli_prints_tone_script() {
    let dir = tempfile::tempdir().unwrap();
    musmcp(dir.path())
        .args(["tone", "--pitch", "440", "--duration", "1", "--script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a1 poscil 0.5, 440.0"))
        .stdout(predicate::str::contains("i 1 0 1.0"));
}

#[test]
fn cli_clamps_negative_knobs() {
    let dir = tempfile::tempdir().unwrap();
    musmcp(dir.path())
        .args([
            "lead", "--attack", "-20", "--sustain", "0", "--release", "0", "--script",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("kamp madsr 0.001, "))
        .stdout(predicate::str::contains(", 0.0, 0.001\n"));
}

#[test]
fn cli_extends_release_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("musmcp.toml"),
        "[render]\nextend_release_tail = true\n",
    )
    .unwrap();

    musmcp(dir.path())
        .args(["lead", "--duration", "1", "--release", "255", "--script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("i 1 0 6.0"));
}

#[test]
fn cli_full_punch_kick_script() {
    let dir = tempfile::tempdir().unwrap();
    musmcp(dir.path())
        .args(["kick", "--fundamental", "50", "--punch", "255", "--script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kpitch expseg 3050.0, 0.01, 50.0"));
}

#[test]
fn cli_reports_missing_engine() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("musmcp.toml"),
        "[engine]\nbinary = \"./definitely-not-csound\"\n",
    )
    .unwrap();

    musmcp(dir.path())
        .args(["tone", "--output", "beep"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to execute Csound"));
}
