//
//  types.rs
//  repograph
//

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Node kind as exposed to presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    External,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::External => "external",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered source file, keyed by its root-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// Root-relative path with `/` separators.
    pub path: String,
    /// Size in bytes at discovery time.
    pub size: u64,
}

/// An import that did not resolve to a discovered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalNode {
    pub module: String,
}

/// Graph node payload. The variant is fixed when the node is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeData {
    File(FileNode),
    External(ExternalNode),
}

impl NodeData {
    pub fn new_file(path: String, size: u64) -> Self {
        NodeData::File(FileNode { path, size })
    }

    pub fn new_external(module: String) -> Self {
        NodeData::External(ExternalNode { module })
    }

    /// Globally unique node identifier.
    pub fn id(&self) -> &str {
        match self {
            NodeData::File(f) => &f.path,
            NodeData::External(e) => &e.module,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::File(_) => NodeKind::File,
            NodeData::External(_) => NodeKind::External,
        }
    }

    /// Byte size for files, `None` for external modules.
    pub fn size(&self) -> Option<u64> {
        match self {
            NodeData::File(f) => Some(f.size),
            NodeData::External(_) => None,
        }
    }

    /// Short display label: the file name for files, the module for externals.
    pub fn label(&self) -> &str {
        match self {
            NodeData::File(f) => f.path.rsplit('/').next().unwrap_or(&f.path),
            NodeData::External(e) => &e.module,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, NodeData::File(_))
    }
}

/// A file found during the repository walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Root-relative path with `/` separators.
    pub rel_path: String,
    pub abs_path: PathBuf,
    pub size: u64,
}

/// Graph statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub file_count: usize,
    pub external_count: usize,
    pub self_loops: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_accessors() {
        let file = NodeData::new_file("pkg/mod.py".to_string(), 120);
        assert_eq!(file.id(), "pkg/mod.py");
        assert_eq!(file.label(), "mod.py");
        assert_eq!(file.kind(), NodeKind::File);
        assert_eq!(file.size(), Some(120));

        let ext = NodeData::new_external("os.path".to_string());
        assert_eq!(ext.id(), "os.path");
        assert_eq!(ext.label(), "os.path");
        assert_eq!(ext.kind(), NodeKind::External);
        assert_eq!(ext.size(), None);
    }

    #[test]
    fn test_node_serializes_with_kind_tag() {
        let json = serde_json::to_value(NodeData::new_external("os".to_string())).unwrap();
        assert_eq!(json["kind"], "external");
        assert_eq!(json["module"], "os");

        let json = serde_json::to_value(NodeData::new_file("a.py".to_string(), 3)).unwrap();
        assert_eq!(json["kind"], "file");
        assert_eq!(json["size"], 3);
    }
}
