//! Configuration validation.
//!
//! Checks numeric ranges and required strings, collecting every problem
//! into a single `ConfigError` so the user sees them all at once.

mod helpers;


use crate::schema::AutoserveConfig;
use autoserve_common::ConfigError;

use helpers::{validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AutoserveConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_non_empty(&mut errors, "server.host", &config.server.host);
    if config.server.root.as_os_str().is_empty() {
        errors.push("server.root must not be empty".into());
    }
    validate_range(&mut errors, "watch.delay_ms", config.watch.delay_ms, 1, 60_000);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
