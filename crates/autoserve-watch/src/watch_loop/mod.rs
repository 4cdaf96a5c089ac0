//! The polling scheduler that ties observation to listener restarts.

mod runner;


pub use runner::{WatchLoop, WatchSummary};
