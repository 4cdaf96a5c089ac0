//! Listener configuration: where to bind and what to serve.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Address and document root of the static file listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host name or IP address to bind.
    pub host: String,
    /// TCP port to bind. `0` lets the OS pick one on first start.
    pub port: u16,
    /// Directory tree that is served and watched.
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 8000,
            root: PathBuf::from("."),
        }
    }
}
