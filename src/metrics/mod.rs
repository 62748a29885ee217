//! Centrality metrics for the dependency graph.
//!
//! # Overview
//!
//! Each metric answers a different question about a node's importance:
//!
//! - **Degree** (`degree`): how many direct connections, in either direction?
//! - **Betweenness** (`betweenness`): which files sit on the shortest import
//!   chains between other files?
//! - **Eigenvector** (`eigenvector`): which modules are imported by other
//!   important modules?
//! - **PageRank** (`pagerank`): where does a random walk along imports end up?
//!
//! Metrics are computed once per graph snapshot into a [`CentralityMetrics`]
//! table keyed by node id. A metric that fails (non-convergence, non-finite
//! values) is zero-filled for every node and reported as a warning; the other
//! metrics are unaffected.
//!
//! ```rust,ignore
//! let out = compute_metrics(&graph, &MetricsConfig::default());
//! for ranked in out.metrics.top_n(Metric::PageRank, 5) {
//!     println!("{} {:.3}", ranked.id, ranked.value);
//! }
//! ```

pub mod betweenness;
pub mod degree;
pub mod eigenvector;
pub mod pagerank;
pub mod ranking;

use std::collections::BTreeMap;
use std::fmt;

use petgraph::Direction;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::MetricsConfig;
use crate::error::AnalysisWarning;
use crate::graph::DependencyGraph;

pub use ranking::RankedNode;

/// The per-node quantities the engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Degree,
    Betweenness,
    Eigenvector,
    PageRank,
    InDegree,
    OutDegree,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Degree,
        Metric::Betweenness,
        Metric::Eigenvector,
        Metric::PageRank,
        Metric::InDegree,
        Metric::OutDegree,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Degree => "degree",
            Metric::Betweenness => "betweenness",
            Metric::Eigenvector => "eigenvector",
            Metric::PageRank => "pagerank",
            Metric::InDegree => "in_degree",
            Metric::OutDegree => "out_degree",
        }
    }

    /// Raw edge counts, which carry no normalized value.
    pub fn is_count(self) -> bool {
        matches!(self, Metric::InDegree | Metric::OutDegree)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a metric could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("{metric} did not converge within {iterations} iterations")]
    NotConverged { metric: Metric, iterations: usize },

    #[error("{metric} is undefined for this graph: {reason}")]
    Undefined { metric: Metric, reason: String },

    #[error("{metric} produced a non-finite value")]
    NonFinite { metric: Metric },
}

impl MetricError {
    pub fn metric(&self) -> Metric {
        match self {
            MetricError::NotConverged { metric, .. }
            | MetricError::Undefined { metric, .. }
            | MetricError::NonFinite { metric } => *metric,
        }
    }
}

/// A raw metric value and its share of the per-metric maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Score {
    pub raw: f64,
    pub normalized: f64,
}

/// Every metric for one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CentralityRecord {
    pub in_degree: usize,
    pub out_degree: usize,
    pub degree: Score,
    pub betweenness: Score,
    pub eigenvector: Score,
    pub pagerank: Score,
}

impl CentralityRecord {
    pub fn raw(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Degree => self.degree.raw,
            Metric::Betweenness => self.betweenness.raw,
            Metric::Eigenvector => self.eigenvector.raw,
            Metric::PageRank => self.pagerank.raw,
            Metric::InDegree => self.in_degree as f64,
            Metric::OutDegree => self.out_degree as f64,
        }
    }

    /// Normalized value, `None` for the raw count metrics.
    pub fn normalized(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Degree => Some(self.degree.normalized),
            Metric::Betweenness => Some(self.betweenness.normalized),
            Metric::Eigenvector => Some(self.eigenvector.normalized),
            Metric::PageRank => Some(self.pagerank.normalized),
            Metric::InDegree | Metric::OutDegree => None,
        }
    }
}

/// Metric table for one graph snapshot, keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CentralityMetrics {
    records: BTreeMap<String, CentralityRecord>,
}

impl CentralityMetrics {
    pub fn get(&self, id: &str) -> Option<&CentralityRecord> {
        self.records.get(id)
    }

    /// Records in node id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CentralityRecord)> {
        self.records.iter().map(|(id, r)| (id.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Metric table plus the metrics that had to be zero-filled.
#[derive(Debug, Clone, Default)]
pub struct MetricsOutput {
    pub metrics: CentralityMetrics,
    pub warnings: Vec<AnalysisWarning>,
}

/// Compute every metric for every node of `graph`.
///
/// Pure function of the graph and the settings; failures never propagate.
pub fn compute_metrics(graph: &DependencyGraph, config: &MetricsConfig) -> MetricsOutput {
    let g = graph.inner_graph();
    let n = g.node_count();
    let mut warnings = Vec::new();

    let degree = settle(Metric::Degree, Ok(degree::degree_centrality(g)), n, &mut warnings);
    let betweenness = settle(
        Metric::Betweenness,
        Ok(betweenness::betweenness_centrality(g)),
        n,
        &mut warnings,
    );
    let eigenvector = settle(
        Metric::Eigenvector,
        eigenvector::eigenvector_centrality(
            g,
            config.eigenvector.max_iterations,
            config.eigenvector.tolerance,
        ),
        n,
        &mut warnings,
    );
    let pagerank = settle(
        Metric::PageRank,
        pagerank::pagerank(
            g,
            config.pagerank.damping,
            config.pagerank.max_iterations,
            config.pagerank.tolerance,
        ),
        n,
        &mut warnings,
    );

    let degree_norm = normalize(&degree);
    let betweenness_norm = normalize(&betweenness);
    let eigenvector_norm = normalize(&eigenvector);
    let pagerank_norm = normalize(&pagerank);

    let mut records = BTreeMap::new();
    for idx in g.node_indices() {
        let i = idx.index();
        let record = CentralityRecord {
            in_degree: g.edges_directed(idx, Direction::Incoming).count(),
            out_degree: g.edges_directed(idx, Direction::Outgoing).count(),
            degree: Score {
                raw: degree[i],
                normalized: degree_norm[i],
            },
            betweenness: Score {
                raw: betweenness[i],
                normalized: betweenness_norm[i],
            },
            eigenvector: Score {
                raw: eigenvector[i],
                normalized: eigenvector_norm[i],
            },
            pagerank: Score {
                raw: pagerank[i],
                normalized: pagerank_norm[i],
            },
        };
        records.insert(g[idx].id().to_string(), record);
    }

    debug!(nodes = n, failed = warnings.len(), "centrality metrics computed");
    MetricsOutput {
        metrics: CentralityMetrics { records },
        warnings,
    }
}

/// Accept a metric's values, or zero-fill it and record why.
fn settle(
    metric: Metric,
    result: Result<Vec<f64>, MetricError>,
    n: usize,
    warnings: &mut Vec<AnalysisWarning>,
) -> Vec<f64> {
    let checked = result.and_then(|values| {
        if values.iter().all(|v| v.is_finite()) {
            Ok(values)
        } else {
            Err(MetricError::NonFinite { metric })
        }
    });

    match checked {
        Ok(values) => values,
        Err(e) => {
            debug!(metric = %metric, error = %e, "metric failed, using zeros");
            warnings.push(AnalysisWarning::Metric(e));
            vec![0.0; n]
        }
    }
}

/// Divide by the maximum; all zeros when the maximum is not positive.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        values.iter().map(|v| v / max).collect()
    } else {
        vec![0.0; values.len()]
    }
}
