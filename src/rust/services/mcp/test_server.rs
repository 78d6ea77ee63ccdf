use super::*;
use std::time::Duration;

use crate::engine::voices::ReleaseTail;
use crate::services::render::{EngineSettings, Renderer};
use crate::services::tools::{KICK_TOOL, ToolContext};

fn server(dir: &std::path::Path) -> McpServer {
    let logger = Arc::new(Logger::silent());
    let settings = EngineSettings {
        binary: dir.join("missing-csound"),
        timeout: Duration::from_secs(5),
    };
    let renderer = Renderer::new(settings, logger.clone()).with_temp_dir(Some(dir.to_path_buf()));
    let registry = ToolRegistry::new(ToolContext {
        renderer,
        release_tail: ReleaseTail::Truncate,
    });
    McpServer::new(registry, logger)
}

async fn roundtrip(server: &McpServer, request: Value) -> Value {
    let reply = server
        .handle_line(&request.to_string())
        .await
        .expect("expected a reply");
    serde_json::from_str(&reply).unwrap()
}

#[tokio::test]
async fn test_initialize_echoes_protocol_version() {
    let dir = tempfile::tempdir().unwrap();
    let reply = roundtrip(
        &server(dir.path()),
        json!({
            "jsonrpc": "2.0", "id": 1, "method": "initialize",
            "params": { "protocolVersion": "2025-03-26", "capabilities": {}, "clientInfo": { "name": "t" } }
        }),
    )
    .await;

    assert_eq!(reply["id"], 1);
    assert_eq!(reply["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(reply["result"]["serverInfo"]["name"], SERVER_NAME);
    assert!(reply["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_notifications_get_no_reply() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path());
    let line = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string();
    assert!(server.handle_line(&line).await.is_none());
}

#[tokio::test]
async fn test_tools_list_exposes_schemas() {
    let dir = tempfile::tempdir().unwrap();
    let reply = roundtrip(
        &server(dir.path()),
        json!({ "jsonrpc": "2.0", "id": "a", "method": "tools/list" }),
    )
    .await;

    let tools = reply["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 4);
    let kick = tools.iter().find(|t| t["name"] == KICK_TOOL).unwrap();
    assert_eq!(kick["inputSchema"]["type"], "object");
}

#[tokio::test]
async fn test_render_failure_is_plain_text_result() {
    let dir = tempfile::tempdir().unwrap();
    let reply = roundtrip(
        &server(dir.path()),
        json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": { "name": KICK_TOOL, "arguments": { "fundamental_hz": 50.0, "punch": 150, "decay": 80, "drive": 50 } }
        }),
    )
    .await;

    assert_eq!(reply["result"]["isError"], false);
    let text = reply["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Failed to execute Csound"));
}

#[tokio::test]
async fn test_unknown_tool_sets_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let reply = roundtrip(
        &server(dir.path()),
        json!({
            "jsonrpc": "2.0", "id": 3, "method": "tools/call",
            "params": { "name": "synthesize_snare", "arguments": {} }
        }),
    )
    .await;

    assert_eq!(reply["result"]["isError"], true);
    assert_eq!(
        reply["result"]["content"][0]["text"],
        "Unknown tool: synthesize_snare"
    );
}

#[tokio::test]
async fn test_resources_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path());

    let list = roundtrip(
        &server,
        json!({ "jsonrpc": "2.0", "id": 4, "method": "resources/list" }),
    )
    .await;
    assert_eq!(list["result"]["resources"].as_array().unwrap().len(), 2);

    let read = roundtrip(
        &server,
        json!({ "jsonrpc": "2.0", "id": 5, "method": "resources/read", "params": { "uri": "lore://drum_design" } }),
    )
    .await;
    let text = read["result"]["contents"][0]["text"].as_str().unwrap();
    assert!(text.contains("808 SUB BASS"));

    let missing = roundtrip(
        &server,
        json!({ "jsonrpc": "2.0", "id": 6, "method": "resources/read", "params": { "uri": "lore://nope" } }),
    )
    .await;
    assert_eq!(missing["error"]["code"], -32602);
}

#[tokio::test]
async fn test_protocol_errors() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path());

    let parse: Value = serde_json::from_str(&server.handle_line("{not json").await.unwrap()).unwrap();
    assert_eq!(parse["error"]["code"], -32700);
    assert_eq!(parse["id"], Value::Null);

    let unknown = roundtrip(
        &server,
        json!({ "jsonrpc": "2.0", "id": 7, "method": "prompts/list" }),
    )
    .await;
    assert_eq!(unknown["error"]["code"], -32601);
    assert_eq!(unknown["id"], 7);

    let invalid = roundtrip(&server, json!({ "jsonrpc": "2.0", "id": 8 })).await;
    assert_eq!(invalid["error"]["code"], -32600);
    assert_eq!(invalid["id"], 8);
}

#[tokio::test]
async fn test_serve_answers_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path());
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
        "\n\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n"
    );

    let mut output: Vec<u8> = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    let replies: Vec<Value> = output
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[0]["result"], json!({}));
    assert_eq!(replies[1]["id"], 2);
}

#[tokio::test]
async fn test_null_id_still_gets_reply() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path());

    let reply = roundtrip(&server, json!({ "jsonrpc": "2.0", "id": null, "method": "ping" })).await;
    assert_eq!(reply["id"], Value::Null);
    assert_eq!(reply["result"], json!({}));
}

#[tokio::test]
async fn test_notification_method_with_id_gets_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path());

    let reply = roundtrip(
        &server,
        json!({ "jsonrpc": "2.0", "id": 3, "method": "notifications/initialized" }),
    )
    .await;
    assert_eq!(reply["id"], 3);
    assert_eq!(reply["result"], json!({}));
}

#[tokio::test]
async fn test_jsonrpc_version_is_checked() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path());

    let wrong = roundtrip(&server, json!({ "jsonrpc": "1.0", "id": 4, "method": "ping" })).await;
    assert_eq!(wrong["error"]["code"], -32600);
    assert_eq!(wrong["id"], 4);

    let missing = roundtrip(&server, json!({ "id": 5, "method": "ping" })).await;
    assert_eq!(missing["error"]["code"], -32600);
    assert_eq!(missing["id"], 5);
}
