//! Newline-delimited JSON-RPC adapter over stdio
//!
//! Flattens tool outcomes to text content. Render failures are ordinary
//! results; only unknown tools and undecodable arguments set `isError`.

pub mod protocol;

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::services::lore::{self, MIME_TYPE};
use crate::services::tools::ToolRegistry;
use crate::tools::logger::Logger;
use protocol::{
    CallToolParams, InitializeParams, PROTOCOL_VERSION, ProtocolError, ReadResourceParams,
    Request, Response, SERVER_NAME,
};

pub struct McpServer {
    registry: ToolRegistry,
    logger: Arc<Logger>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, logger: Arc<Logger>) -> Self {
        Self { registry, logger }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub async fn serve_stdio(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.serve(stdin, &mut stdout).await
    }

    /// Handle requests in arrival order until the reader hits EOF.
    pub async fn serve<R, W>(&self, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.logger.info(format!(
            "{} ready: {} tools, {} resources",
            SERVER_NAME,
            self.registry.descriptors().count(),
            lore::RESOURCES.len()
        ));

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await.context("reading request")? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(reply) = self.handle_line(&line).await {
                writer
                    .write_all(reply.as_bytes())
                    .await
                    .context("writing response")?;
                writer.write_all(b"\n").await.context("writing response")?;
                writer.flush().await.context("flushing response")?;
            }
        }

        self.logger.info("Input closed, shutting down");
        Ok(())
    }

    /// One request line in, at most one response line out.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Err(e) => Some(Response::failure(
                Value::Null,
                &ProtocolError::Parse(e.to_string()),
            )),
            Ok(value) => {
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                match serde_json::from_value::<Request>(value) {
                    Ok(request) => self.handle(request).await,
                    Err(e) => Some(Response::failure(
                        id,
                        &ProtocolError::InvalidRequest(e.to_string()),
                    )),
                }
            }
        };

        response.map(|r| match serde_json::to_string(&r) {
            Ok(text) => text,
            Err(e) => {
                self.logger.error(format!("Failed to encode response: {}", e));
                r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error"}}"#
                    .to_string()
            }
        })
    }

    pub async fn handle(&self, request: Request) -> Option<Response> {
        self.logger.debug(format!("<- {}", request.method));
        let outcome = match request.validate() {
            Ok(()) => self.dispatch(&request.method, request.params).await,
            Err(err) => Err(err),
        };

        let id = request.id?;
        Some(match outcome {
            Ok(result) => Response::success(id, result),
            Err(err) => {
                self.logger.warn(err.to_string());
                Response::failure(id, &err)
            }
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, ProtocolError> {
        match method {
            "initialize" => {
                let params: InitializeParams = decode_params(params)?;
                Ok(json!({
                    "protocolVersion": params.protocol_version.unwrap_or_else(|| PROTOCOL_VERSION.to_string()),
                    "capabilities": {
                        "tools": { "listChanged": false },
                        "resources": { "subscribe": false, "listChanged": false }
                    },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }))
            }
            "ping" => Ok(json!({})),
            "tools/list" => {
                let tools: Vec<Value> = self
                    .registry
                    .descriptors()
                    .map(|d| {
                        json!({
                            "name": d.name,
                            "description": d.description,
                            "inputSchema": d.input_schema
                        })
                    })
                    .collect();
                Ok(json!({ "tools": tools }))
            }
            "tools/call" => {
                let params: CallToolParams = decode_params(params)?;
                Ok(self.call_tool(params).await)
            }
            "resources/list" => {
                let resources: Vec<Value> = lore::RESOURCES
                    .iter()
                    .map(|r| {
                        json!({
                            "uri": r.uri,
                            "name": r.name,
                            "description": r.description,
                            "mimeType": MIME_TYPE
                        })
                    })
                    .collect();
                Ok(json!({ "resources": resources }))
            }
            "resources/read" => {
                let params: ReadResourceParams = decode_params(params)?;
                let resource = lore::find(&params.uri).ok_or_else(|| {
                    ProtocolError::InvalidParams(format!("unknown resource: {}", params.uri))
                })?;
                Ok(json!({
                    "contents": [{
                        "uri": resource.uri,
                        "mimeType": MIME_TYPE,
                        "text": resource.text
                    }]
                }))
            }
            m if m.starts_with("notifications/") => Ok(json!({})),
            other => Err(ProtocolError::MethodNotFound(other.to_string())),
        }
    }

    async fn call_tool(&self, params: CallToolParams) -> Value {
        self.logger.action(format!("Calling tool {}", params.name));
        let (text, is_error) = match self.registry.call(&params.name, params.arguments).await {
            Ok(output) => (output.text(), false),
            Err(err) => (err.to_string(), true),
        };
        json!({
            "content": [{ "type": "text", "text": text }],
            "isError": is_error
        })
    }
}

fn decode_params<T: DeserializeOwned>(params: Value) -> Result<T, ProtocolError> {
    let params = match params {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(params).map_err(|e| ProtocolError::InvalidParams(e.to_string()))
}

#[cfg(test)]
#[path = "test_server.rs"]
mod tests;
