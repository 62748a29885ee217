//
//  mod.rs
//  repograph
//

mod helpers;
mod python;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tree_sitter::Parser;

use super::language::SupportedLanguage;
use crate::config::Granularity;

/// Module identifiers referenced by one file, in sorted order.
pub type ModuleSet = BTreeSet<String>;

/// Why a single file contributed no imports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("syntax error in {path} at line {line}")]
    Syntax { path: PathBuf, line: usize },

    #[error("parser failed for {path}: {message}")]
    Parser { path: PathBuf, message: String },
}

impl ParseError {
    /// The file this error belongs to.
    pub fn path(&self) -> &Path {
        match self {
            ParseError::Read { path, .. }
            | ParseError::Syntax { path, .. }
            | ParseError::Parser { path, .. } => path,
        }
    }
}

/// Static import extraction for one source dialect.
///
/// Implementations never execute code and never panic on malformed input:
/// a file they cannot make sense of is reported as a [`ParseError`].
pub trait ImportExtractor: Send + Sync {
    /// Whether this extractor analyzes the file at `path`.
    fn handles(&self, path: &Path) -> bool;

    /// Module identifiers referenced by `source`. `path` is only used for
    /// error context.
    fn extract(&self, path: &Path, source: &str) -> Result<ModuleSet, ParseError>;
}

/// Tree-sitter based extractor for Python sources.
///
/// A file is rejected only when tree-sitter produces error or missing nodes.
/// The grammar is more lenient than CPython's own parser: some Python 2
/// constructs such as `print 'hi'` parse cleanly, so such files still
/// contribute their imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonExtractor {
    granularity: Granularity,
}

impl PythonExtractor {
    pub fn new(granularity: Granularity) -> Self {
        Self { granularity }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }
}

impl ImportExtractor for PythonExtractor {
    fn handles(&self, path: &Path) -> bool {
        SupportedLanguage::from_path(path) == Some(SupportedLanguage::Python)
    }

    fn extract(&self, path: &Path, source: &str) -> Result<ModuleSet, ParseError> {
        let mut parser = Parser::new();
        let ts_lang = SupportedLanguage::Python.tree_sitter_language();
        parser
            .set_language(&ts_lang)
            .map_err(|e| ParseError::Parser {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Parser {
                path: path.to_path_buf(),
                message: "tree-sitter returned no tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line: helpers::first_error_line(&root),
            });
        }

        let mut imports = ModuleSet::new();
        python::collect_python_imports(&root, source.as_bytes(), self.granularity, &mut imports);
        Ok(imports)
    }
}
