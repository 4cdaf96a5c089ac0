//! Core change observer implementation.

use autoserve_config::HashSource;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use super::walk::{scan, Scan};
use crate::fingerprint::FingerprintStore;

/// Reports files under a root that appeared or changed since the last pass.
///
/// Entries for files that disappear stay in the store, so a file deleted
/// and recreated with an identical fingerprint is not reported.
#[derive(Debug)]
pub struct ChangeObserver {
    root: PathBuf,
    hash_source: HashSource,
    store: FingerprintStore<PathBuf>,
}

impl ChangeObserver {
    pub fn new(root: impl Into<PathBuf>, hash_source: HashSource) -> Self {
        Self::with_store(root, hash_source, FingerprintStore::new())
    }

    /// Create an observer around a caller-supplied store, e.g. one built
    /// with a custom [`Fingerprinter`](crate::Fingerprinter).
    pub fn with_store(
        root: impl Into<PathBuf>,
        hash_source: HashSource,
        store: FingerprintStore<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            hash_source,
            store,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn hash_source(&self) -> HashSource {
        self.hash_source
    }

    pub fn store(&self) -> &FingerprintStore<PathBuf> {
        &self.store
    }

    /// Walk the root from scratch.
    pub fn scan(&self) -> Scan {
        scan(&self.root)
    }

    /// Number of files a fresh scan currently sees.
    pub fn file_count(&self) -> usize {
        self.scan().count()
    }

    /// Run one detection pass over the whole tree.
    ///
    /// Newly discovered files are registered and reported, so the first
    /// pass reports the full inventory. Known files are reported when their
    /// fingerprint no longer matches. Files that cannot be read this pass
    /// are skipped.
    pub fn observe(&mut self) -> BTreeSet<PathBuf> {
        let mut changed = BTreeSet::new();

        for path in self.scan() {
            let input = match fingerprint_input(&path, self.hash_source) {
                Ok(input) => input,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping file for this pass");
                    continue;
                }
            };

            if !self.store.contains(&path) {
                self.store.register(path.clone(), &input, false);
                changed.insert(path);
            } else if !self.store.compare(&path, &input) {
                self.store.update(&path, &input);
                changed.insert(path);
            }
        }

        if !changed.is_empty() {
            debug!(count = changed.len(), root = %self.root.display(), "observed changes");
        }
        changed
    }
}

/// Bytes fed to the fingerprinter for `path` under the given strategy.
fn fingerprint_input(path: &Path, hash_source: HashSource) -> io::Result<Vec<u8>> {
    match hash_source {
        HashSource::Mtime => {
            let modified = std::fs::metadata(path)?.modified()?;
            Ok(timestamp_bytes(modified).to_vec())
        }
        HashSource::Content => std::fs::read(path),
    }
}

/// Encode a timestamp as a sign byte, whole seconds and nanoseconds
/// relative to the Unix epoch.
fn timestamp_bytes(time: SystemTime) -> [u8; 13] {
    let (sign, offset) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (0u8, after),
        Err(before) => (1u8, before.duration()),
    };

    let mut bytes = [0u8; 13];
    bytes[0] = sign;
    bytes[1..9].copy_from_slice(&offset.as_secs().to_le_bytes());
    bytes[9..].copy_from_slice(&offset.subsec_nanos().to_le_bytes());
    bytes
}
