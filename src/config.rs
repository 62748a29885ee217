//
//  config.rs
//  repograph
//

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RepoGraphError, Result};

/// Top-level configuration.
///
/// Every section falls back to its defaults, so a user file only needs to name
/// the values it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub visualization: VisualConfig,
}

/// How much of a dotted module path is kept as the node identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// `import a.b.c` records `a.b.c`.
    #[default]
    Full,
    /// `import a.b.c` records `a`.
    TopLevel,
}

/// Repository walk and extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Ignore file read from the repository root.
    pub ignore_file: String,
    /// Directory names that are never descended into.
    pub exclude_dirs: Vec<String>,
    pub granularity: Granularity,
    /// Keep imports that resolve to no discovered file as external nodes.
    pub include_external: bool,
    /// Parse files on the rayon thread pool.
    pub parallel: bool,
}

/// Centrality engine settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub pagerank: PageRankConfig,
    pub eigenvector: EigenvectorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    pub damping: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EigenvectorConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
}

/// Ranked summary settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Entries listed per metric in the importance summary.
    pub top_n: usize,
}

/// Visual attributes handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub height: String,
    pub background: String,
    pub font_color: String,
    pub file_color: String,
    pub external_color: String,
    /// Size of a node with zero betweenness.
    pub base_size: f64,
    /// Extra size added at normalized betweenness 1.0.
    pub size_scale: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ignore_file: ".gitignore".to_string(),
            exclude_dirs: vec![
                ".git".to_string(),
                "venv".to_string(),
                ".venv".to_string(),
                "__pycache__".to_string(),
            ],
            granularity: Granularity::Full,
            include_external: true,
            parallel: true,
        }
    }
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1.0e-6,
        }
    }
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1.0e-6,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            height: "900px".to_string(),
            background: "#ffffff".to_string(),
            font_color: "black".to_string(),
            file_color: "#97C2FC".to_string(),
            external_color: "#FFA07A".to_string(),
            base_size: 20.0,
            size_scale: 30.0,
        }
    }
}

impl Config {
    /// Load the defaults, overlaid by a YAML file when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(RepoGraphError::ConfigNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents).map_err(|source| RepoGraphError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Reject values the metric engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let pr = &self.metrics.pagerank;
        if !(pr.damping > 0.0 && pr.damping < 1.0) {
            return Err(RepoGraphError::InvalidConfig(format!(
                "metrics.pagerank.damping must be in (0, 1), got {}",
                pr.damping
            )));
        }
        if pr.max_iterations == 0 || self.metrics.eigenvector.max_iterations == 0 {
            return Err(RepoGraphError::InvalidConfig(
                "metric max_iterations must be at least 1".to_string(),
            ));
        }
        if pr.tolerance <= 0.0 || self.metrics.eigenvector.tolerance <= 0.0 {
            return Err(RepoGraphError::InvalidConfig(
                "metric tolerance must be positive".to_string(),
            ));
        }
        if self.analysis.ignore_file.trim().is_empty() {
            return Err(RepoGraphError::InvalidConfig(
                "analysis.ignore_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
