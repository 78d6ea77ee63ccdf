// CLI-specific modules (argument parsing, terminal colors)
#[cfg(feature = "cli")]
pub mod cli;

pub mod logger;
