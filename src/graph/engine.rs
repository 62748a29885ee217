//
//  engine.rs
//  repograph
//

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use super::types::*;

/// Directed dependency graph. Edges point from an importing file to what it
/// depends on.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// The directed graph storing import relationships.
    pub(crate) graph: DiGraph<NodeData, ()>,
    /// Index: node id -> node index.
    pub(crate) index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the underlying petgraph (for the metric algorithms).
    pub(crate) fn inner_graph(&self) -> &DiGraph<NodeData, ()> {
        &self.graph
    }

    // ─── Node Operations ────────────────────────────────────────

    /// Add a file node. Returns the existing index if the id is already present.
    pub fn add_file(&mut self, path: String, size: u64) -> NodeIndex {
        if let Some(&idx) = self.index.get(&path) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData::new_file(path.clone(), size));
        self.index.insert(path, idx);
        idx
    }

    /// Add an external module node, or reuse whatever node already has this id.
    pub fn add_external(&mut self, module: String) -> NodeIndex {
        if let Some(&idx) = self.index.get(&module) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData::new_external(module.clone()));
        self.index.insert(module, idx);
        idx
    }

    // ─── Edge Operations ────────────────────────────────────────

    /// Add a dependency edge. Duplicate edges collapse into one; self-edges
    /// are kept. Returns `true` if a new edge was created.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) -> bool {
        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, ());
        true
    }

    // ─── Lookup ─────────────────────────────────────────────────

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&NodeData> {
        self.node_index(id).map(|idx| &self.graph[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
