use assert_cmd::Command;
use predicates::prelude::*;

fn musmcp(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("musmcp").expect("binary not found");
    cmd.current_dir(dir);
    cmd
}

#[test]
fn cli_lists_tools() {
    let dir = tempfile::tempdir().unwrap();
    musmcp(dir.path())
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("synthesize_sawtooth_lead_bass"))
        .stdout(predicate::str::contains("synthesize_kick_drum"))
        .stdout(predicate::str::contains("render_csd"));
}

#[test]
fn cli_prints_lore_sheet() {
    let dir = tempfile::tempdir().unwrap();
    musmcp(dir.path())
        .args(["lore", "drum_design"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PUNCHY HOUSE KICK"));
}

#[test]
fn cli_rejects_unknown_lore_sheet() {
    let dir = tempfile::tempdir().unwrap();
    musmcp(dir.path())
        .args(["lore", "snare_design"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sound_design"));
}

#[test]
fn cli_lore_logs_to_stderr_when_verbose() {
    let dir = tempfile::tempdir().unwrap();
    musmcp(dir.path())
        .args(["--verbose", "lore", "sound_design"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WARM PAD"))
        .stderr(predicate::str::contains("[DEBUG] Reading lore://sound_design"));
}
