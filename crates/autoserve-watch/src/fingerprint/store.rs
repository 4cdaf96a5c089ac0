//! Core fingerprint store implementation.

use autoserve_common::FingerprintError;
use sha2::{Digest, Sha256};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;

/// Opaque digest of a fingerprint input.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint(")?;
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..)")
    }
}

/// One-way function from a fingerprint input to a comparable value.
///
/// Inputs that collide are treated as unchanged.
pub trait Fingerprinter: Send + Sync {
    fn fingerprint(&self, input: &[u8]) -> Fingerprint;
}

/// Default fingerprinter: SHA-256 of the input bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Fingerprinter;

impl Fingerprinter for Sha256Fingerprinter {
    fn fingerprint(&self, input: &[u8]) -> Fingerprint {
        let digest = Sha256::digest(input);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Fingerprint(bytes)
    }
}

/// Mapping from key to the fingerprint of the value last registered for it.
///
/// `register` inserts only when the key is absent (unless forced), while
/// `update` only overwrites keys that already exist and never inserts.
pub struct FingerprintStore<K = PathBuf> {
    entries: HashMap<K, Fingerprint>,
    fingerprinter: Box<dyn Fingerprinter>,
}

impl<K: Eq + Hash> FingerprintStore<K> {
    pub fn new() -> Self {
        Self::with_fingerprinter(Sha256Fingerprinter)
    }

    pub fn with_fingerprinter(fingerprinter: impl Fingerprinter + 'static) -> Self {
        Self {
            entries: HashMap::new(),
            fingerprinter: Box::new(fingerprinter),
        }
    }

    /// Fingerprint `value` with this store's function, without touching the store.
    pub fn fingerprint(&self, value: impl AsRef<[u8]>) -> Fingerprint {
        self.fingerprinter.fingerprint(value.as_ref())
    }

    /// Insert the fingerprint of `value` under `key`.
    ///
    /// Returns `false` without mutating anything if `key` is already
    /// present and `force` is not set. A forced register of an existing
    /// key overwrites it like [`update`](Self::update).
    pub fn register(&mut self, key: K, value: impl AsRef<[u8]>, force: bool) -> bool {
        if self.entries.contains_key(&key) && !force {
            return false;
        }
        let fingerprint = self.fingerprint(value);
        self.entries.insert(key, fingerprint);
        true
    }

    /// Overwrite the fingerprint of an existing key.
    ///
    /// Returns `false` and leaves the store untouched if `key` is absent.
    pub fn update<Q>(&mut self, key: &Q, value: impl AsRef<[u8]>) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let fingerprint = self.fingerprint(value);
        match self.entries.get_mut(key) {
            Some(stored) => {
                *stored = fingerprint;
                true
            }
            None => false,
        }
    }

    /// Whether `key` is present and `value` fingerprints to the stored value.
    pub fn compare<Q>(&self, key: &Q, value: impl AsRef<[u8]>) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get(key) {
            Some(stored) => *stored == self.fingerprint(value),
            None => false,
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Result<Fingerprint, FingerprintError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.entries
            .get(key)
            .copied()
            .ok_or_else(|| FingerprintError::NotFound(format!("{key:?}")))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash> Default for FingerprintStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for FingerprintStore<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FingerprintStore")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
