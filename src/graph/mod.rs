//! Dependency graph module.
//!
//! Provides the graph data model, the engine that owns the petgraph
//! storage, read-only queries, and the builder that walks a repository
//! into a graph.

pub mod builder;
pub mod engine;
pub mod query;
pub mod types;

pub use builder::{build_graph, BuildOutput, GraphBuilder};
pub use engine::DependencyGraph;
pub use types::{ExternalNode, FileNode, GraphStats, NodeData, NodeKind, SourceFile};
