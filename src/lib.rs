//! # repograph
//!
//! Dependency graph and centrality analysis for Python repositories.
//!
//! repograph walks a repository, extracts the imports of every `.py` file
//! with tree-sitter, and assembles a directed graph whose nodes are files and
//! external modules. It then scores each node with degree, betweenness,
//! eigenvector and PageRank centrality so the most important modules stand
//! out.
//!
//! ## Key Features
//!
//! - **Static**: source is parsed, never executed
//! - **Ignore-aware**: honours the repository's `.gitignore` (best-effort glob matching)
//! - **Deterministic**: the same tree always yields the same graph
//! - **Failure-tolerant**: broken files and non-converging metrics become warnings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repograph::{analyze, Config};
//! use std::path::Path;
//!
//! let analysis = analyze(Path::new("."), &Config::default()).unwrap();
//! println!("{} nodes", analysis.graph.node_count());
//! println!("{}", analysis.summary(5));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod metrics;
pub mod parser;
pub mod present;
pub mod repository;

// Re-exports for convenience
pub use config::{Config, Granularity};
pub use error::{AnalysisWarning, RepoGraphError, Result};
pub use filter::IgnoreFilter;
pub use graph::{build_graph, BuildOutput, DependencyGraph, GraphBuilder, NodeData, NodeKind};
pub use metrics::{compute_metrics, CentralityMetrics, CentralityRecord, Metric, MetricError};
pub use parser::{ImportCache, ImportExtractor, ParseError, PythonExtractor};
pub use present::{ArtifactFormat, ImportanceSummary};
pub use repository::RepositoryRoot;

use std::path::Path;

use tracing::info;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub root: RepositoryRoot,
    pub graph: DependencyGraph,
    pub metrics: CentralityMetrics,
    /// Recoverable failures, file-level first, then metric-level.
    pub warnings: Vec<AnalysisWarning>,
    visual: config::VisualConfig,
}

impl Analysis {
    /// Top `top_n` nodes per metric.
    pub fn summary(&self, top_n: usize) -> ImportanceSummary {
        ImportanceSummary::build(&self.graph, &self.metrics, top_n)
    }

    /// Render the graph in the requested format.
    pub fn render(&self, format: ArtifactFormat) -> Result<String> {
        let styles = present::style_nodes(&self.graph, &self.metrics, &self.visual);
        match format {
            ArtifactFormat::Html => present::render_html(&self.graph, &styles, &self.visual),
            ArtifactFormat::Dot => Ok(present::render_dot(&self.graph, &styles)),
        }
    }
}

/// Analyze the repository at `path`: walk, parse, build the graph and score it.
///
/// Fails only when the root is unusable; per-file and per-metric failures are
/// returned as warnings.
pub fn analyze(path: &Path, config: &Config) -> Result<Analysis> {
    let root = RepositoryRoot::open(path, &config.analysis)?;
    info!(root = %root.path().display(), "analyzing repository");

    let BuildOutput {
        graph,
        mut warnings,
    } = build_graph(&root, &config.analysis);
    let metrics_out = compute_metrics(&graph, &config.metrics);
    warnings.extend(metrics_out.warnings);

    Ok(Analysis {
        root,
        graph,
        metrics: metrics_out.metrics,
        warnings,
        visual: config.visualization.clone(),
    })
}
