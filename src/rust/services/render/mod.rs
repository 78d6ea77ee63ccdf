//! Csound render invoker
//!
//! Persists a script to a temp `.csd`, runs `csound -d -W -o <out> <csd>` and
//! maps the process outcome to a path or a [`RenderError`]. Nothing is ever
//! cleaned up: scripts and outputs stay on disk for later retrieval.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::process::Command;

use crate::engine::csound::SCRIPT_EXTENSION;
use crate::tools::logger::{LogLevel, Logger};

pub const AUDIO_EXTENSION: &str = "wav";
pub const DEFAULT_ENGINE: &str = "csound";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const TEMP_PREFIX: &str = "musmcp-";

/// `-d` no displays, `-W` WAV output.
const ENGINE_FLAGS: [&str; 2] = ["-d", "-W"];
const OUTPUT_FLAG: &str = "-o";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Launch,
    Engine,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Script, output path or process could not be set up.
    #[error("Failed to execute Csound: {0}")]
    Launch(String),

    /// Csound ran and exited non-zero.
    #[error("Error rendering CSD:\nSTDOUT:\n{stdout}\nSTDERR:\n{stderr}")]
    Engine {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to execute Csound: no exit after {timeout:?}, process killed")]
    Timeout { timeout: Duration },
}

impl RenderError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RenderError::Launch(_) => FailureKind::Launch,
            RenderError::Engine { .. } => FailureKind::Engine,
            RenderError::Timeout { .. } => FailureKind::Timeout,
        }
    }

    fn launch(context: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        RenderError::Launch(format!("{}: {}", context, err))
    }
}

pub type RenderResult = Result<PathBuf, RenderError>;

/// Boundary text: the absolute path on success, the diagnostic otherwise.
pub fn flatten(result: &RenderResult) -> String {
    match result {
        Ok(path) => path.display().to_string(),
        Err(err) => err.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub binary: PathBuf,
    pub timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_ENGINE),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Append `.wav` unless already present, then absolutize against `base_dir`.
pub fn resolve_output_path(filename: &str, base_dir: &Path) -> PathBuf {
    let suffix = format!(".{}", AUDIO_EXTENSION);
    let mut name = filename.to_string();
    if !name.ends_with(&suffix) {
        name.push_str(&suffix);
    }
    let path = Path::new(&name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Argument vector handed to the engine, in its fixed order.
pub fn engine_args(output: &Path, script: &Path) -> Vec<String> {
    let mut args: Vec<String> = ENGINE_FLAGS.iter().map(|f| f.to_string()).collect();
    args.push(OUTPUT_FLAG.to_string());
    args.push(output.display().to_string());
    args.push(script.display().to_string());
    args
}

#[derive(Debug, Clone)]
pub struct Renderer {
    settings: EngineSettings,
    temp_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    logger: Arc<Logger>,
}

impl Renderer {
    pub fn new(settings: EngineSettings, logger: Arc<Logger>) -> Self {
        Self {
            settings,
            temp_dir: None,
            output_dir: None,
            logger,
        }
    }

    /// Directory for temp scripts and unnamed outputs. Defaults to the OS temp dir.
    pub fn with_temp_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.temp_dir = dir;
        self
    }

    /// Base for caller-named outputs. Defaults to the current working directory.
    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub async fn render(&self, script: &str, output_filename: Option<&str>) -> RenderResult {
        let started = Instant::now();
        let result = self.run(script, output_filename).await;

        match &result {
            Ok(path) => self.logger.success(format!(
                "Rendered {} in {:.1} ms",
                path.display(),
                started.elapsed().as_secs_f64() * 1000.0
            )),
            Err(RenderError::Engine { code, stderr, .. }) => self.logger.log_with_details(
                LogLevel::Error,
                format!(
                    "Csound exited with {}",
                    code.map(|c| c.to_string())
                        .unwrap_or_else(|| "signal".to_string())
                ),
                stderr.lines().rev().take(5).collect::<Vec<_>>().into_iter().rev(),
            ),
            Err(err) => self.logger.error(err.to_string()),
        }

        result
    }

    async fn run(&self, script: &str, output_filename: Option<&str>) -> RenderResult {
        let script_path = self.write_script(script)?;
        let output_path = self.output_path(output_filename)?;

        let args = engine_args(&output_path, &script_path);
        self.logger.action(format!(
            "Running {} {}",
            self.settings.binary.display(),
            args.join(" ")
        ));

        let child = Command::new(&self.settings.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RenderError::launch(self.settings.binary.display(), e))?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.settings.timeout, child.wait_with_output())
            .await
        {
            Ok(output) => output.map_err(|e| RenderError::launch("waiting for csound", e))?,
            Err(_) => {
                return Err(RenderError::Timeout {
                    timeout: self.settings.timeout,
                });
            }
        };

        if !output.status.success() {
            return Err(RenderError::Engine {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output_path)
    }

    fn write_script(&self, script: &str) -> Result<PathBuf, RenderError> {
        let mut file = self
            .temp_file(SCRIPT_EXTENSION)
            .map_err(|e| RenderError::launch("creating temp script", e))?;
        file.write_all(script.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| RenderError::launch("writing temp script", e))?;
        let (_, path) = file
            .keep()
            .map_err(|e| RenderError::launch("persisting temp script", e.error))?;
        self.logger.debug(format!("Wrote script {}", path.display()));
        absolute(path)
    }

    fn output_path(&self, output_filename: Option<&str>) -> Result<PathBuf, RenderError> {
        match output_filename {
            Some(name) => {
                let base = match &self.output_dir {
                    Some(dir) => dir.clone(),
                    None => std::env::current_dir()
                        .map_err(|e| RenderError::launch("resolving working directory", e))?,
                };
                absolute(resolve_output_path(name, &base))
            }
            None => {
                let file = self
                    .temp_file(AUDIO_EXTENSION)
                    .map_err(|e| RenderError::launch("allocating temp output", e))?;
                let (_, path) = file
                    .keep()
                    .map_err(|e| RenderError::launch("allocating temp output", e.error))?;
                absolute(path)
            }
        }
    }

    fn temp_file(&self, extension: &str) -> std::io::Result<tempfile::NamedTempFile> {
        let suffix = format!(".{}", extension);
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(&suffix);
        match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }
}

fn absolute(path: PathBuf) -> Result<PathBuf, RenderError> {
    std::path::absolute(&path).map_err(|e| RenderError::launch(path.display(), e))
}

#[cfg(test)]
#[path = "test_render.rs"]
mod tests;
