//! Change-detection configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// What a file fingerprint is computed from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum HashSource {
    /// Last-modified timestamp. One stat per file per poll.
    #[default]
    Mtime,
    /// Full file content. One read per file per poll.
    Content,
}

impl fmt::Display for HashSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashSource::Mtime => f.write_str("mtime"),
            HashSource::Content => f.write_str("content"),
        }
    }
}

impl FromStr for HashSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mtime" => Ok(HashSource::Mtime),
            "content" => Ok(HashSource::Content),
            other => Err(format!(
                "unknown hash source '{other}' (expected 'mtime' or 'content')"
            )),
        }
    }
}

/// Polling configuration for the watch loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Delay between polls in milliseconds (valid range: 1-60000).
    pub delay_ms: u64,
    pub hash_source: HashSource,
}

impl WatchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1,
            hash_source: HashSource::Mtime,
        }
    }
}
