pub mod errors;
pub mod events;

pub use errors::{AutoserveError, ConfigError, FingerprintError, ServeError};
pub use events::{Event, EventBus};

pub type Result<T> = std::result::Result<T, AutoserveError>;
