//! Presentation adapter: node styling, the importance summary and the
//! rendered artifacts (interactive HTML or static DOT).

pub mod dot;
pub mod html;
pub mod style;
pub mod summary;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{RepoGraphError, Result};

pub use dot::render_dot;
pub use html::render_html;
pub use style::{style_nodes, NodeStyle};
pub use summary::{ImportanceSummary, SummaryEntry, SummarySection};

/// Output format of the written artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArtifactFormat {
    #[default]
    Html,
    Dot,
}

impl ArtifactFormat {
    pub fn default_file_name(self) -> &'static str {
        match self {
            ArtifactFormat::Html => "repo_visualization.html",
            ArtifactFormat::Dot => "repo_visualization.dot",
        }
    }
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    let render_err = |source| RepoGraphError::Render {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(render_err)?;
    }
    fs::write(path, contents).map_err(render_err)?;
    info!(path = %path.display(), bytes = contents.len(), "artifact written");
    Ok(())
}
