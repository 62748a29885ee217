//! Per-run cache of extracted imports.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use super::extractor::{ModuleSet, ParseError};

/// Cached outcome of extracting one file. Failures are cached too: a file is
/// parsed at most once per run and never retried.
pub type CachedImports = Result<Arc<ModuleSet>, ParseError>;

/// Import cache keyed by absolute file path.
///
/// Owned by one analysis run and passed explicitly to the builder. Entries are
/// written once per key; concurrent inserts of distinct keys are safe.
#[derive(Debug, Default)]
pub struct ImportCache {
    entries: RwLock<HashMap<PathBuf, CachedImports>>,
}

impl ImportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<CachedImports> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(path).cloned()
    }

    /// Return the cached entry for `path`, computing it with `extract` on a miss.
    ///
    /// `extract` runs outside the lock. If two workers race on the same key the
    /// first insert wins and both observe it.
    pub fn get_or_insert_with<F>(&self, path: &Path, extract: F) -> CachedImports
    where
        F: FnOnce() -> CachedImports,
    {
        if let Some(hit) = self.get(path) {
            return hit;
        }
        let value = extract();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.entry(path.to_path_buf()).or_insert(value).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
