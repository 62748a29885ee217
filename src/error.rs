//! Error types for repograph.
//!
//! Fatal errors abort a run and surface through [`RepoGraphError`]. Failures local
//! to one file or one metric are recoverable: they are wrapped in an
//! [`AnalysisWarning`] and returned next to the result they did not prevent.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::metrics::MetricError;
use crate::parser::ParseError;

/// Fatal errors for one analysis run.
#[derive(Debug, Error)]
pub enum RepoGraphError {
    #[error("repository path does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to write {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for repograph operations.
pub type Result<T> = std::result::Result<T, RepoGraphError>;

/// A recoverable failure recorded during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisWarning {
    /// A source file could not be read or parsed; it contributes no imports.
    Parse(ParseError),
    /// A metric could not be computed; it was zero-filled.
    Metric(MetricError),
    /// A directory entry could not be visited during the walk.
    Walk { path: Option<PathBuf>, message: String },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::Parse(e) => write!(f, "{e}"),
            AnalysisWarning::Metric(e) => write!(f, "{e}"),
            AnalysisWarning::Walk {
                path: Some(path),
                message,
            } => write!(f, "skipped {}: {message}", path.display()),
            AnalysisWarning::Walk {
                path: None,
                message,
            } => write!(f, "walk error: {message}"),
        }
    }
}

impl From<ParseError> for AnalysisWarning {
    fn from(e: ParseError) -> Self {
        AnalysisWarning::Parse(e)
    }
}

impl From<MetricError> for AnalysisWarning {
    fn from(e: MetricError) -> Self {
        AnalysisWarning::Metric(e)
    }
}
