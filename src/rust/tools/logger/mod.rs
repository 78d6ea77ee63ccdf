#[cfg(feature = "cli")]
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use std::fmt::Write;

pub mod writer;
pub use writer::LogWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Action,
    Success,
    Warning,
    Error,
}

/// Stderr logger. Stdout is reserved for protocol traffic and command results.
#[derive(Debug, Clone)]
pub struct Logger {
    min_level: Option<LogLevel>,
    colored: bool,
    file: Option<LogWriter>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            min_level: Some(LogLevel::Info),
            colored: stderr_is_terminal(),
            file: None,
        }
    }

    /// A logger that drops every message.
    pub fn silent() -> Self {
        Self {
            min_level: None,
            colored: false,
            file: None,
        }
    }

    /// `None` disables terminal output entirely.
    pub fn with_min_level(mut self, level: Option<LogLevel>) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_file(mut self, writer: LogWriter) -> Self {
        self.file = Some(writer);
        self
    }

    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.min_level
            .is_some_and(|min| level.severity() >= min.severity())
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let message = message.as_ref();
        self.record(level, message);
        if self.enabled(level) {
            self.print_line(level, message);
        }
    }

    pub fn log_with_details<I, S>(&self, level: LogLevel, message: impl AsRef<str>, details: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.log(level, message);
        for detail in details {
            let detail = detail.as_ref();
            self.record(level, &format!("  {}", detail));
            if self.enabled(level) {
                eprintln!("   ↳ {}", detail);
            }
        }
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Success, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn action(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Action, message);
    }

    fn record(&self, level: LogLevel, message: &str) {
        if let Some(file) = &self.file {
            // Log file failures are reported, not propagated.
            if let Err(err) = file.append(level.as_label(), message) {
                if self.enabled(LogLevel::Warning) {
                    eprintln!("[WARN] log file write failed: {:#}", err);
                }
            }
        }
    }

    fn print_line(&self, level: LogLevel, message: &str) {
        #[cfg(feature = "cli")]
        {
            if self.colored {
                eprintln!("{}", self.render_colored_line(level, message));
                return;
            }
        }
        eprintln!("{}", render_plain_line(level, message));
    }

    #[cfg(feature = "cli")]
    fn render_colored_line(&self, level: LogLevel, message: &str) -> String {
        let mut out = String::new();
        let color = level.color();

        let _ = write!(out, "{}", SetForegroundColor(Color::Grey));
        out.push('[');
        let _ = write!(
            out,
            "{}{}musmcp{}",
            SetForegroundColor(Color::Rgb {
                r: 36,
                g: 199,
                b: 181,
            }),
            SetAttribute(Attribute::Bold),
            SetAttribute(Attribute::Reset)
        );
        let _ = write!(out, "{}]{}", SetForegroundColor(Color::Grey), ResetColor);
        out.push(' ');

        let _ = write!(
            out,
            "{}{}[{}]{}{}",
            SetForegroundColor(color),
            SetAttribute(Attribute::Bold),
            level.as_label(),
            SetAttribute(Attribute::Reset),
            ResetColor
        );
        out.push(' ');
        out.push_str(message);
        out
    }
}

pub fn render_plain_line(level: LogLevel, message: &str) -> String {
    let mut out = String::new();
    let _ = write!(out, "[musmcp] [{}] {}", level.as_label(), message);
    out
}

impl LogLevel {
    fn severity(self) -> u8 {
        match self {
            LogLevel::Debug => 0,
            LogLevel::Info | LogLevel::Action | LogLevel::Success => 1,
            LogLevel::Warning => 2,
            LogLevel::Error => 3,
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Action => "ACTION",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Parse a configured threshold. `"off"` yields `Ok(None)`.
    pub fn parse_filter(s: &str) -> Result<Option<Self>, String> {
        match s.trim().to_lowercase().as_str() {
            "debug" | "trace" => Ok(Some(LogLevel::Debug)),
            "info" => Ok(Some(LogLevel::Info)),
            "warn" | "warning" => Ok(Some(LogLevel::Warning)),
            "error" => Ok(Some(LogLevel::Error)),
            "off" | "none" | "quiet" => Ok(None),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }

    #[cfg(feature = "cli")]
    fn color(self) -> Color {
        match self {
            LogLevel::Success => Color::Rgb {
                r: 76,
                g: 175,
                b: 80,
            },
            LogLevel::Error => Color::Rgb {
                r: 244,
                g: 67,
                b: 54,
            },
            LogLevel::Info => Color::Rgb {
                r: 33,
                g: 150,
                b: 243,
            },
            LogLevel::Warning => Color::Rgb {
                r: 255,
                g: 152,
                b: 0,
            },
            LogLevel::Debug => Color::Rgb {
                r: 121,
                g: 134,
                b: 203,
            },
            LogLevel::Action => Color::Rgb {
                r: 0,
                g: 188,
                b: 212,
            },
        }
    }
}

#[cfg(feature = "cli")]
fn stderr_is_terminal() -> bool {
    atty::is(atty::Stream::Stderr)
}

#[cfg(not(feature = "cli"))]
fn stderr_is_terminal() -> bool {
    false
}

#[cfg(test)]
#[path = "test_logger.rs"]
mod tests;
