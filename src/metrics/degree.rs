//! Degree centrality.

use petgraph::graph::DiGraph;
use petgraph::Direction;

/// Fraction of the other nodes each node is directly connected to, counting
/// both directions: `(in + out) / (n - 1)`. Zero for graphs with fewer than
/// two nodes. A self-edge counts once in each direction.
pub fn degree_centrality<N, E>(graph: &DiGraph<N, E>) -> Vec<f64> {
    let n = graph.node_count();
    if n < 2 {
        return vec![0.0; n];
    }

    let scale = 1.0 / (n - 1) as f64;
    graph
        .node_indices()
        .map(|idx| {
            let degree = graph.edges_directed(idx, Direction::Incoming).count()
                + graph.edges_directed(idx, Direction::Outgoing).count();
            degree as f64 * scale
        })
        .collect()
}
