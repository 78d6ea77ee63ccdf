use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn cli_serves_stdio_session() {
    let dir = tempfile::tempdir().unwrap();
    let session = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"0"}}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"resources/read","params":{"uri":"lore://sound_design"}}"#,
        "\n"
    );

    let mut cmd = Command::cargo_bin("musmcp").expect("binary not found");
    let assert = cmd
        .current_dir(dir.path())
        .arg("serve")
        .write_stdin(session)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Csound Controller\""));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let replies: Vec<&str> = stdout.lines().collect();
    assert_eq!(replies.len(), 3);
    assert!(replies[1].contains("synthesize_kick_drum"));
    assert!(replies[2].contains("WARM PAD"));
}
