//! The repository being analyzed.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::AnalysisConfig;
use crate::error::{RepoGraphError, Result};
use crate::filter::IgnoreFilter;

/// Validated, canonical repository root together with its ignore rules.
///
/// Immutable for the duration of one run.
#[derive(Debug, Clone)]
pub struct RepositoryRoot {
    path: PathBuf,
    filter: Arc<IgnoreFilter>,
}

impl RepositoryRoot {
    /// Validate `path` and load the ignore rules found at its root.
    pub fn open(path: &Path, config: &AnalysisConfig) -> Result<Self> {
        if !path.exists() {
            return Err(RepoGraphError::RootNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(RepoGraphError::NotADirectory(path.to_path_buf()));
        }
        let path = path.canonicalize()?;
        let filter = IgnoreFilter::load(&path, &config.ignore_file, &config.exclude_dirs);
        Ok(Self {
            path,
            filter: Arc::new(filter),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filter(&self) -> &IgnoreFilter {
        &self.filter
    }

    pub(crate) fn shared_filter(&self) -> Arc<IgnoreFilter> {
        Arc::clone(&self.filter)
    }

    /// Root-relative form of `path` with `/` separators, or `None` when the
    /// path lies outside the root.
    pub fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.path).ok()?;
        let segments: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(segments.join("/"))
        }
    }
}
