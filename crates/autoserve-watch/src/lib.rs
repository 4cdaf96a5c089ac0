//! Change detection and restart orchestration for autoserve.
//!
//! A [`ChangeObserver`] polls a directory tree and diffs every file's
//! fingerprint against a [`FingerprintStore`]. The [`WatchLoop`] drives
//! the observer on a fixed delay and, after the warm-up pass, swaps the
//! single listener owned by [`ListenerLifecycle`] whenever something
//! changed.

pub mod fingerprint;
pub mod lifecycle;
pub mod observer;
pub mod watch_loop;

#[cfg(test)]
mod testing;

pub use fingerprint::{Fingerprint, FingerprintStore, Fingerprinter, Sha256Fingerprinter};
pub use lifecycle::{ListenerHandle, ListenerLifecycle, Servable, Worker};
pub use observer::{scan, ChangeObserver, Scan};
pub use watch_loop::{WatchLoop, WatchSummary};
