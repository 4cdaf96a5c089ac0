//! Recursive file-change observer.
//!
//! [`scan`] lazily walks every regular file under a root; the
//! [`ChangeObserver`] turns successive scans into change sets by diffing
//! fingerprints against its [`FingerprintStore`](crate::FingerprintStore).

mod change_observer;
mod walk;


pub use change_observer::ChangeObserver;
pub use walk::{scan, Scan};
