//! Betweenness centrality using Brandes' algorithm.
//!
//! Brandes (2001) "A Faster Algorithm for Betweenness Centrality". Edges are
//! followed in their import direction only, and every node pair is weighted
//! equally (unweighted shortest paths via BFS).

use std::collections::VecDeque;

use petgraph::graph::DiGraph;
use petgraph::Direction;

/// Betweenness centrality for every node, indexed by node index.
///
/// Normalized by `1 / ((n - 1)(n - 2))` when `n > 2`, the directed-graph
/// convention; smaller graphs are returned unscaled (always zero).
pub fn betweenness_centrality<N, E>(graph: &DiGraph<N, E>) -> Vec<f64> {
    let n = graph.node_count();
    let mut betweenness = vec![0.0_f64; n];
    if n == 0 {
        return betweenness;
    }

    let adjacency: Vec<Vec<usize>> = graph
        .node_indices()
        .map(|idx| {
            let mut out: Vec<usize> = graph
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|m| m.index())
                .collect();
            out.sort_unstable();
            out.dedup();
            out
        })
        .collect();

    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut distance = vec![-1_i64; n];
    let mut delta = vec![0.0_f64; n];
    let mut queue = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        for p in predecessors.iter_mut() {
            p.clear();
        }
        sigma.fill(0.0);
        distance.fill(-1);
        delta.fill(0.0);

        sigma[s] = 1.0;
        distance[s] = 0;
        queue.push_back(s);

        // BFS: count shortest paths from s
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &adjacency[v] {
                if distance[w] < 0 {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                betweenness[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for value in betweenness.iter_mut() {
            *value *= scale;
        }
    }
    betweenness
}
