//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive scoping this level to the autoserve crates.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "autoserve=trace",
            LogLevel::Debug => "autoserve=debug",
            LogLevel::Info => "autoserve=info",
            LogLevel::Warn => "autoserve=warn",
            LogLevel::Error => "autoserve=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
