//! Configuration schema types for autoserve.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults of the command-line tool.

mod logging;
mod server;
mod watch;

pub use logging::*;
pub use server::*;
pub use watch::*;

use serde::{Deserialize, Serialize};

/// Root configuration for autoserve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct AutoserveConfig {
    pub server: ServerConfig,
    pub watch: WatchConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
