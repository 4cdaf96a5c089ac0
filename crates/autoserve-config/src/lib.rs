//! autoserve configuration system.
//!
//! Provides TOML-based configuration for the listener address, the
//! watched root and the polling strategy. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use autoserve_config::{load_config_from, validate};
//!
//! let config = load_config_from(None).expect("failed to load config");
//! validate(&config).expect("invalid config");
//! println!("serving {} on port {}", config.server.root.display(), config.server.port);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

// Re-export core types for convenience
pub use schema::{
    AutoserveConfig, HashSource, LogLevel, LoggingConfig, ServerConfig, WatchConfig,
};
pub use validation::validate;

use autoserve_common::ConfigError;
use std::path::Path;

/// Load config from an explicit path, or from the platform default when
/// `path` is `None`. The result is not validated.
pub fn load_config_from(path: Option<&Path>) -> Result<AutoserveConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}
