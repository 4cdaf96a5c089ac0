//! Path-to-fingerprint registry.
//!
//! Stores a one-way digest of each file's timestamp or content instead
//! of the data itself, so a comparison pass never has to keep file bytes
//! around.

mod store;


pub use store::{Fingerprint, FingerprintStore, Fingerprinter, Sha256Fingerprinter};
