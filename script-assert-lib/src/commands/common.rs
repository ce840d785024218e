//! Arguments and setup shared between commands.

use crate::rules::DEFAULT_RULES_FILE;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Format of the verdict report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Console,

    /// Machine-readable JSON
    Json,
}

/// Arguments shared by commands that read a rule file
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Path to the rule file (default is `script-assert.toml`)
    #[arg(long, short = 'r', value_name = "PATH")]
    pub rules: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl RulesArgs {
    #[must_use]
    pub fn rules_path(&self) -> Utf8PathBuf {
        self.rules.clone().unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_RULES_FILE))
    }
}

/// Initialize logger based on log level
///
/// Only the first initialization in a process takes effect.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[must_use]
pub fn use_colors(color: ColorMode) -> bool {
    match color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            use std::io::{IsTerminal, stdout};
            stdout().is_terminal()
        }
    }
}
