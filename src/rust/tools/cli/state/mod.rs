use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::platform::config::AppConfig;
use crate::services::mcp::McpServer;
use crate::services::render::Renderer;
use crate::services::tools::{ToolContext, ToolRegistry};
use crate::tools::logger::{LogLevel, Logger};

#[derive(Clone)]
pub struct CliContext {
    logger: Arc<Logger>,
    config: AppConfig,
}

impl CliContext {
    pub fn load(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let config = match config_path {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load(std::env::current_dir()?)?,
        };

        let mut logger = config.logger()?;
        if verbose {
            logger = logger.with_min_level(Some(LogLevel::Debug));
        }

        Ok(Self {
            logger: Arc::new(logger),
            config,
        })
    }

    pub fn logger(&self) -> Arc<Logger> {
        Arc::clone(&self.logger)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn renderer(&self) -> Renderer {
        self.config.renderer(self.logger())
    }

    pub fn registry(&self) -> ToolRegistry {
        ToolRegistry::new(ToolContext {
            renderer: self.renderer(),
            release_tail: self.config.release_tail(),
        })
    }

    pub fn server(&self) -> McpServer {
        McpServer::new(self.registry(), self.logger())
    }
}
