use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::voices::ReleaseTail;
use crate::services::render::{DEFAULT_ENGINE, EngineSettings, Renderer};
use crate::tools::logger::{LogLevel, LogWriter, Logger};

pub const TOML_CONFIG: &str = "musmcp.toml";
pub const JSON_CONFIG: &str = "musmcp.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineSection,
    pub render: RenderSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    pub binary: PathBuf,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSection {
    /// Add the mapped release time to the subtractive voice's note length.
    pub extend_release_tail: bool,
    pub temp_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_ENGINE),
            timeout_secs: 120,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Load `musmcp.toml` or `musmcp.json` from `root`, defaults when neither exists.
    /// When both exist the TOML file wins.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        for name in [TOML_CONFIG, JSON_CONFIG] {
            let path = root.join(name);
            if path.is_file() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or_else(|| raw.trim_start().starts_with('{'));

        let mut config: AppConfig = if is_json {
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid JSON config: {}", path.display()))?
        } else {
            toml::from_str(&raw)
                .with_context(|| format!("invalid TOML config: {}", path.display()))?
        };

        if let Some(base) = path.parent() {
            config.resolve_relative_paths(base);
        }
        Ok(config)
    }

    /// Paths in a config file are relative to the file, not to the process.
    fn resolve_relative_paths(&mut self, base: &Path) {
        let join = |p: &mut Option<PathBuf>| {
            if let Some(path) = p.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        };
        join(&mut self.render.temp_dir);
        join(&mut self.render.output_dir);
        join(&mut self.logging.file);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.engine.timeout_secs.max(1))
    }

    pub fn release_tail(&self) -> ReleaseTail {
        if self.render.extend_release_tail {
            ReleaseTail::Extend
        } else {
            ReleaseTail::Truncate
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            binary: self.engine.binary.clone(),
            timeout: self.timeout(),
        }
    }

    pub fn log_level(&self) -> Result<Option<LogLevel>> {
        LogLevel::parse_filter(&self.logging.level).map_err(anyhow::Error::msg)
    }

    pub fn logger(&self) -> Result<Logger> {
        let mut logger = Logger::new().with_min_level(self.log_level()?);
        if let Some(file) = &self.logging.file {
            logger = logger.with_file(LogWriter::new(file));
        }
        Ok(logger)
    }

    pub fn renderer(&self, logger: Arc<Logger>) -> Renderer {
        Renderer::new(self.engine_settings(), logger)
            .with_temp_dir(self.render.temp_dir.clone())
            .with_output_dir(self.render.output_dir.clone())
    }
}

#[cfg(test)]
#[path = "test_config.rs"]
mod tests;
