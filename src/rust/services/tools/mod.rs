//! Tool registry - the remote-callable surface, built once at startup
pub mod handlers;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::engine::voices::ReleaseTail;
use crate::services::render::{FailureKind, RenderResult, Renderer, flatten};

pub const SUBTRACTIVE_TOOL: &str = "synthesize_sawtooth_lead_bass";
pub const KICK_TOOL: &str = "synthesize_kick_drum";
pub const TONE_TOOL: &str = "synthesize_tone";
pub const RAW_SCRIPT_TOOL: &str = "render_csd";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub renderer: Renderer,
    pub release_tail: ReleaseTail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub result: RenderResult,
}

impl ToolOutput {
    pub fn text(&self) -> String {
        flatten(&self.result)
    }

    pub fn failure(&self) -> Option<FailureKind> {
        self.result.as_ref().err().map(|e| e.kind())
    }
}

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, ctx: &ToolContext, arguments: Value) -> Result<ToolOutput, ToolError>;
}

pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    handler: Box<dyn ToolHandler>,
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, ToolDescriptor>,
    context: ToolContext,
}

impl ToolRegistry {
    pub fn new(context: ToolContext) -> Self {
        let mut registry = Self {
            tools: BTreeMap::new(),
            context,
        };

        registry.register(
            SUBTRACTIVE_TOOL,
            handlers::SUBTRACTIVE_DESCRIPTION,
            handlers::subtractive_schema(),
            Box::new(handlers::SubtractiveTool),
        );
        registry.register(
            KICK_TOOL,
            handlers::KICK_DESCRIPTION,
            handlers::kick_schema(),
            Box::new(handlers::KickTool),
        );
        registry.register(
            TONE_TOOL,
            handlers::TONE_DESCRIPTION,
            handlers::tone_schema(),
            Box::new(handlers::ToneTool),
        );
        registry.register(
            RAW_SCRIPT_TOOL,
            handlers::RAW_SCRIPT_DESCRIPTION,
            handlers::raw_script_schema(),
            Box::new(handlers::RawScriptTool),
        );

        registry
    }

    fn register(
        &mut self,
        name: &'static str,
        description: &'static str,
        input_schema: Value,
        handler: Box<dyn ToolHandler>,
    ) {
        self.tools.insert(
            name,
            ToolDescriptor {
                name,
                description,
                input_schema,
                handler,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    /// Descriptors in name order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    pub async fn call(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        descriptor.handler.call(&self.context, arguments).await
    }
}

/// Decode tool arguments; a missing argument object counts as `{}`.
pub fn decode_arguments<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "test_registry.rs"]
mod tests;
