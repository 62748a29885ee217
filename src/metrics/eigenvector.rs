//! Eigenvector centrality by power iteration.

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;

use super::{Metric, MetricError};

/// Eigenvector centrality for every node, indexed by node index.
///
/// Iterates `x <- x (A + I)` with Euclidean normalization, so a node's score
/// is fed by the nodes that import it. The identity shift keeps the iteration
/// from oscillating on bipartite structures. Converged when the L1 change
/// drops below `n * tolerance`.
pub fn eigenvector_centrality<N, E>(
    graph: &DiGraph<N, E>,
    max_iterations: usize,
    tolerance: f64,
) -> Result<Vec<f64>, MetricError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut x = vec![1.0 / n as f64; n];
    for _ in 0..max_iterations {
        let last = x.clone();
        for edge in graph.edge_references() {
            x[edge.target().index()] += last[edge.source().index()];
        }

        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        if !(norm > 0.0 && norm.is_finite()) {
            return Err(MetricError::Undefined {
                metric: Metric::Eigenvector,
                reason: format!("vector norm is {norm}"),
            });
        }
        for value in x.iter_mut() {
            *value /= norm;
        }

        let change: f64 = x.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
        if change < n as f64 * tolerance {
            return Ok(x);
        }
    }

    Err(MetricError::NotConverged {
        metric: Metric::Eigenvector,
        iterations: max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eigenvector_empty() {
        let graph: DiGraph<(), ()> = DiGraph::new();
        assert_eq!(eigenvector_centrality(&graph, 100, 1e-6), Ok(Vec::new()));
    }

    #[test]
    fn test_eigenvector_single_node() {
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        graph.add_node(());
        assert_eq!(eigenvector_centrality(&graph, 100, 1e-6), Ok(vec![1.0]));
    }

    #[test]
    fn test_eigenvector_symmetric_cycle() {
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b, ());
        graph.add_edge(b, a, ());

        let x = eigenvector_centrality(&graph, 100, 1e-6).unwrap();
        let expected = std::f64::consts::FRAC_1_SQRT_2;
        assert!((x[0] - expected).abs() < 1e-9);
        assert!((x[1] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_eigenvector_favors_imported_node() {
        // Three files in a cycle, all importing `shared`
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        let files: Vec<_> = (0..3).map(|_| graph.add_node(())).collect();
        let shared = graph.add_node(());
        for i in 0..3 {
            graph.add_edge(files[i], files[(i + 1) % 3], ());
            graph.add_edge(files[i], shared, ());
        }

        let x = eigenvector_centrality(&graph, 1000, 1e-6).unwrap();
        for &f in &files {
            assert!(x[shared.index()] > x[f.index()]);
        }
        let norm: f64 = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_eigenvector_not_converged() {
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b, ());

        assert_eq!(
            eigenvector_centrality(&graph, 2, 1e-6),
            Err(MetricError::NotConverged {
                metric: Metric::Eigenvector,
                iterations: 2
            })
        );
    }
}
