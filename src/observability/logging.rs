//! Logging setup
//!
//! Components log through `tracing`; this module installs the subscriber
//! from the `[logging]` configuration section.

use crate::error::{Result, ShimError};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LogFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON structured format
    Json,
}

impl LogFormat {
    /// Parse log format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Log configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Level,
    /// Log format (text or json)
    pub format: LogFormat,
    /// Include the event target in each line
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Text,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Parse log level from string
    pub fn parse_level(s: &str) -> Option<Level> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }

    /// Build from the textual `[logging]` settings
    pub fn from_section(level: &str, format: &str) -> Result<Self> {
        let level = Self::parse_level(level)
            .ok_or_else(|| ShimError::Config(format!("invalid log level '{}'", level)))?;
        let format = LogFormat::parse(format)
            .ok_or_else(|| ShimError::Config(format!("invalid log format '{}'", format)))?;
        Ok(Self {
            level,
            format,
            ..Default::default()
        })
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` directives override the configured level. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt()
        .with_target(config.with_target)
        .with_level(true)
        .with_env_filter(filter);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| ShimError::Config(format!("failed to install logger: {}", e)))
}
