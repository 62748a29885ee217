//! PageRank by power iteration.
//!
//! Page et al. (1999) "The PageRank Citation Ranking". Rank flows along import
//! edges, so heavily imported modules accumulate it.

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::{Metric, MetricError};

/// PageRank for every node, indexed by node index. Scores sum to 1.
///
/// Nodes without outgoing edges spread their rank uniformly over all nodes.
/// Converged when the L1 change drops below `n * tolerance`.
pub fn pagerank<N, E>(
    graph: &DiGraph<N, E>,
    damping: f64,
    max_iterations: usize,
    tolerance: f64,
) -> Result<Vec<f64>, MetricError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let out_degrees: Vec<usize> = graph
        .node_indices()
        .map(|idx| graph.edges_directed(idx, Direction::Outgoing).count())
        .collect();
    let teleport = (1.0 - damping) / n as f64;

    // Initialize: uniform distribution
    let mut ranks = vec![1.0 / n as f64; n];
    for _ in 0..max_iterations {
        let last = std::mem::replace(&mut ranks, vec![0.0; n]);

        // Distribute rank along edges
        for edge in graph.edge_references() {
            let from = edge.source().index();
            ranks[edge.target().index()] += damping * last[from] / out_degrees[from] as f64;
        }

        // Dangling nodes (no outgoing edges)
        let dangling_sum: f64 = last
            .iter()
            .zip(&out_degrees)
            .filter(|(_, deg)| **deg == 0)
            .map(|(rank, _)| rank)
            .sum();
        let spread = damping * dangling_sum / n as f64 + teleport;
        for rank in ranks.iter_mut() {
            *rank += spread;
        }

        let change: f64 = ranks.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
        if change < n as f64 * tolerance {
            return Ok(ranks);
        }
    }

    Err(MetricError::NotConverged {
        metric: Metric::PageRank,
        iterations: max_iterations,
    })
}
