//! Lazy recursive enumeration of regular files.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Start a fresh walk of every regular file beneath `root`.
///
/// Nothing is cached between calls. Symlinks to files are yielded, symlinks
/// to directories are not descended into, and entries that cannot be read
/// are skipped.
pub fn scan(root: &Path) -> Scan {
    Scan {
        inner: WalkDir::new(root).into_iter(),
    }
}

/// Iterator returned by [`scan`].
pub struct Scan {
    inner: walkdir::IntoIter,
}

impl Iterator for Scan {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
                return Some(entry.into_path());
            }
        }
    }
}
