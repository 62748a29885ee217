//
//  query.rs
//  repograph
//

use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::engine::DependencyGraph;
use super::types::*;

impl DependencyGraph {
    /// Iterate all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.node_weights()
    }

    /// Iterate all edges as `(from, to)` node ids.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph
            .edge_references()
            .map(move |e| (self.graph[e.source()].id(), self.graph[e.target()].id()))
    }

    /// All node ids, sorted.
    pub fn node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.nodes().map(|n| n.id().to_string()).collect();
        ids.sort();
        ids
    }

    /// All edges as owned id pairs, sorted. Two graphs built from the same
    /// filesystem state have equal edge lists.
    pub fn edge_list(&self) -> Vec<(String, String)> {
        let mut edges: Vec<(String, String)> = self
            .edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        edges.sort();
        edges
    }

    /// Nodes of the given kind, in insertion order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &NodeData> {
        self.nodes().filter(move |n| n.kind() == kind)
    }

    /// Number of edges pointing at `id` (how often it is imported).
    pub fn in_degree(&self, id: &str) -> Option<usize> {
        let idx = self.node_index(id)?;
        Some(self.graph.edges_directed(idx, Direction::Incoming).count())
    }

    /// Number of edges leaving `id` (how many things it imports).
    pub fn out_degree(&self, id: &str) -> Option<usize> {
        let idx = self.node_index(id)?;
        Some(self.graph.edges_directed(idx, Direction::Outgoing).count())
    }

    /// What `id` imports, sorted by id.
    pub fn dependencies(&self, id: &str) -> Vec<&NodeData> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// What imports `id`, sorted by id.
    pub fn dependents(&self, id: &str) -> Vec<&NodeData> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&NodeData> {
        let Some(idx) = self.node_index(id) else {
            return Vec::new();
        };
        let mut nodes: Vec<&NodeData> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| &self.graph[n])
            .collect();
        nodes.sort_by(|a, b| a.id().cmp(b.id()));
        nodes.dedup_by(|a, b| a.id() == b.id());
        nodes
    }

    /// Get graph statistics.
    pub fn stats(&self) -> GraphStats {
        let mut file_count = 0;
        let mut external_count = 0;

        for node in self.graph.node_weights() {
            match node.kind() {
                NodeKind::File => file_count += 1,
                NodeKind::External => external_count += 1,
            }
        }

        let self_loops = self
            .graph
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count();

        GraphStats {
            total_nodes: file_count + external_count,
            total_edges: self.graph.edge_count(),
            file_count,
            external_count,
            self_loops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        let main = graph.add_file("main.py".to_string(), 10);
        let util = graph.add_file("pkg/util.py".to_string(), 20);
        let os = graph.add_external("os".to_string());
        graph.add_edge(main, util);
        graph.add_edge(main, os);
        graph.add_edge(util, os);
        graph
    }

    #[test]
    fn test_degrees() {
        let graph = sample();
        assert_eq!(graph.out_degree("main.py"), Some(2));
        assert_eq!(graph.in_degree("main.py"), Some(0));
        assert_eq!(graph.in_degree("os"), Some(2));
        assert_eq!(graph.out_degree("os"), Some(0));
        assert_eq!(graph.in_degree("missing"), None);
    }

    #[test]
    fn test_dependencies_and_dependents() {
        let graph = sample();
        let deps: Vec<&str> = graph.dependencies("main.py").iter().map(|n| n.id()).collect();
        assert_eq!(deps, vec!["os", "pkg/util.py"]);

        let users: Vec<&str> = graph.dependents("os").iter().map(|n| n.id()).collect();
        assert_eq!(users, vec!["main.py", "pkg/util.py"]);
    }

    #[test]
    fn test_dependents_unknown_node() {
        let graph = DependencyGraph::new();
        assert!(graph.dependents("anything").is_empty());
        assert!(graph.dependencies("anything").is_empty());
    }

    #[test]
    fn test_edge_list_sorted() {
        let graph = sample();
        assert_eq!(
            graph.edge_list(),
            vec![
                ("main.py".to_string(), "os".to_string()),
                ("main.py".to_string(), "pkg/util.py".to_string()),
                ("pkg/util.py".to_string(), "os".to_string()),
            ]
        );
    }

    #[test]
    fn test_nodes_of_kind() {
        let graph = sample();
        assert_eq!(graph.nodes_of_kind(NodeKind::File).count(), 2);
        assert_eq!(graph.nodes_of_kind(NodeKind::External).count(), 1);
    }

    #[test]
    fn test_degree_sum_matches_edge_count() {
        let graph = sample();
        let total_in: usize = graph.node_ids().iter().filter_map(|id| graph.in_degree(id)).sum();
        let total_out: usize = graph.node_ids().iter().filter_map(|id| graph.out_degree(id)).sum();
        assert_eq!(total_in, graph.edge_count());
        assert_eq!(total_out, graph.edge_count());
    }
}
