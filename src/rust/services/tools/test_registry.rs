use super::*;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::services::render::EngineSettings;
use crate::tools::logger::Logger;

fn registry_with_engine(binary: std::path::PathBuf, dir: &std::path::Path) -> ToolRegistry {
    let settings = EngineSettings {
        binary,
        timeout: Duration::from_secs(10),
    };
    let renderer = Renderer::new(settings, Arc::new(Logger::silent()))
        .with_temp_dir(Some(dir.to_path_buf()))
        .with_output_dir(Some(dir.to_path_buf()));
    ToolRegistry::new(ToolContext {
        renderer,
        release_tail: ReleaseTail::Truncate,
    })
}

#[cfg(unix)]
fn copying_registry(dir: &std::path::Path) -> ToolRegistry {
    use std::os::unix::fs::PermissionsExt;

    let engine = dir.join("fake-csound");
    std::fs::write(&engine, "#!/bin/sh\ncp \"$5\" \"$4\"\n").unwrap();
    std::fs::set_permissions(&engine, std::fs::Permissions::from_mode(0o755)).unwrap();
    registry_with_engine(engine, dir)
}

fn registry(dir: &std::path::Path) -> ToolRegistry {
    registry_with_engine(dir.join("missing-csound"), dir)
}

#[test]
fn test_registry_lists_every_tool() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(dir.path());

    let names: Vec<&str> = registry.descriptors().map(|d| d.name).collect();
    assert_eq!(
        names,
        vec![RAW_SCRIPT_TOOL, KICK_TOOL, SUBTRACTIVE_TOOL, TONE_TOOL]
    );
}

#[test]
fn test_schemas_declare_required_knobs() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(dir.path());

    let kick = registry.get(KICK_TOOL).unwrap();
    assert_eq!(kick.input_schema["type"], "object");
    assert_eq!(
        kick.input_schema["required"],
        json!(["fundamental_hz", "punch", "decay", "drive"])
    );
    assert_eq!(kick.input_schema["properties"]["punch"]["type"], "integer");
    assert!(kick.input_schema["properties"]["output_filename"].is_object());
}

#[tokio::test]
async fn test_unknown_tool() {
    let dir = tempfile::tempdir().unwrap();
    let err = registry(dir.path())
        .call("synthesize_snare", json!({}))
        .await
        .unwrap_err();
    assert_eq!(err, ToolError::UnknownTool("synthesize_snare".into()));
}

#[tokio::test]
async fn test_missing_argument_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = registry(dir.path())
        .call(TONE_TOOL, json!({ "pitch": 440.0 }))
        .await
        .unwrap_err();
    match err {
        ToolError::InvalidArguments { tool, message } => {
            assert_eq!(tool, TONE_TOOL);
            assert!(message.contains("duration"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fractional_knob_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = registry(dir.path())
        .call(
            KICK_TOOL,
            json!({ "fundamental_hz": 50.0, "punch": 1.5, "decay": 10, "drive": 10 }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidArguments { .. }));
}

#[tokio::test]
async fn test_launch_failure_is_returned_as_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = registry(dir.path())
        .call(
            KICK_TOOL,
            json!({ "fundamental_hz": 50.0, "punch": 999, "decay": -3, "drive": 10 }),
        )
        .await
        .unwrap();

    assert_eq!(output.failure(), Some(FailureKind::Launch));
    assert!(output.text().starts_with("Failed to execute Csound"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_tool_call_renders_generated_script() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let engine = dir.path().join("fake-csound");
    std::fs::write(&engine, "#!/bin/sh\ncp \"$5\" \"$4\"\n").unwrap();
    std::fs::set_permissions(&engine, std::fs::Permissions::from_mode(0o755)).unwrap();
    let registry = registry_with_engine(engine, dir.path());

    let output = registry
        .call(
            SUBTRACTIVE_TOOL,
            json!({
                "pitch": 55.0, "duration": 1.0, "cutoff_hz": 400.0,
                "attack": 0, "decay": 80, "sustain": 0, "release": 0,
                "output_filename": "bass_pluck"
            }),
        )
        .await
        .unwrap();

    assert_eq!(output.failure(), None);
    let path = std::path::PathBuf::from(output.text());
    assert_eq!(path, dir.path().join("bass_pluck.wav"));

    let script = std::fs::read_to_string(&path).unwrap();
    assert!(script.contains("kamp madsr 0.001, "));
    assert!(script.contains("i 1 0 1.0"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_huge_integer_knob_saturates() {
    let dir = tempfile::tempdir().unwrap();
    let registry = copying_registry(dir.path());

    for (name, punch) in [("max_u64", "18446744073709551615"), ("huge_float", "1e20")] {
        let arguments: Value = serde_json::from_str(&format!(
            r#"{{ "fundamental_hz": 50.0, "punch": {}, "decay": 10, "drive": 10, "output_filename": "{}" }}"#,
            punch, name
        ))
        .unwrap();
        let output = registry.call(KICK_TOOL, arguments).await.unwrap();

        assert_eq!(output.failure(), None, "{name}");
        let script = std::fs::read_to_string(output.text()).unwrap();
        assert!(script.contains("kpitch expseg 3050.0, 0.01, 50.0, "), "{name}");
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_whole_float_knob_matches_integer() {
    let dir = tempfile::tempdir().unwrap();
    let registry = copying_registry(dir.path());

    let mut scripts = Vec::new();
    for (name, punch) in [("int_punch", json!(150)), ("float_punch", json!(150.0))] {
        let output = registry
            .call(
                KICK_TOOL,
                json!({
                    "fundamental_hz": 50.0, "punch": punch, "decay": -20.0, "drive": 10,
                    "output_filename": name
                }),
            )
            .await
            .unwrap();
        assert_eq!(output.failure(), None, "{name}");
        scripts.push(std::fs::read_to_string(output.text()).unwrap());
    }

    assert_eq!(scripts[0], scripts[1]);
    assert!(scripts[0].contains("kamp expseg 1.0, 0.1, 0.001"));
}

#[tokio::test]
async fn test_non_numeric_knob_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = registry(dir.path())
        .call(
            SUBTRACTIVE_TOOL,
            json!({
                "pitch": 55.0, "duration": 1.0, "cutoff_hz": 400.0,
                "attack": "fast", "decay": 80, "sustain": 0, "release": 0
            }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidArguments { .. }));
}
