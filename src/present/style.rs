//
//  style.rs
//  repograph
//

use std::collections::HashMap;

use serde::Serialize;

use crate::config::VisualConfig;
use crate::graph::{DependencyGraph, NodeData, NodeKind};
use crate::metrics::{CentralityMetrics, CentralityRecord, Metric};

/// Ranking lines shown in every tooltip, in display order.
const RANKINGS: [(&str, Metric); 5] = [
    ("Centrality", Metric::Betweenness),
    ("Influence", Metric::Eigenvector),
    ("Connectivity", Metric::PageRank),
    ("Usage", Metric::InDegree),
    ("Dependencies", Metric::OutDegree),
];

/// Visual attributes for one node, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStyle {
    pub id: String,
    pub label: String,
    /// Hover text.
    pub title: String,
    pub color: String,
    pub size: f64,
    #[serde(skip)]
    pub kind: NodeKind,
}

/// Style every node of `graph`, in node id order.
pub fn style_nodes(
    graph: &DependencyGraph,
    metrics: &CentralityMetrics,
    visual: &VisualConfig,
) -> Vec<NodeStyle> {
    let ranks: Vec<(&str, HashMap<String, usize>)> = RANKINGS
        .iter()
        .map(|&(title, metric)| {
            let table = metrics
                .ranking(metric)
                .into_iter()
                .enumerate()
                .map(|(pos, r)| (r.id, pos + 1))
                .collect();
            (title, table)
        })
        .collect();

    let mut nodes: Vec<&NodeData> = graph.nodes().collect();
    nodes.sort_by(|a, b| a.id().cmp(b.id()));

    nodes
        .into_iter()
        .map(|node| {
            let record = metrics.get(node.id()).copied().unwrap_or_default();
            let color = match node.kind() {
                NodeKind::File => &visual.file_color,
                NodeKind::External => &visual.external_color,
            };
            NodeStyle {
                id: node.id().to_string(),
                label: node.label().to_string(),
                title: tooltip(node, &record, &ranks),
                color: color.clone(),
                size: visual.base_size + record.betweenness.normalized * visual.size_scale,
                kind: node.kind(),
            }
        })
        .collect()
}

fn tooltip(
    node: &NodeData,
    record: &CentralityRecord,
    ranks: &[(&str, HashMap<String, usize>)],
) -> String {
    let (kind, size) = match node.size() {
        Some(bytes) => ("File", format!("{:.2} KB", bytes as f64 / 1024.0)),
        None => ("External Import", "N/A".to_string()),
    };

    let mut lines = vec![
        node.id().to_string(),
        "-------------------".to_string(),
        format!("Type: {kind}"),
        format!("Size: {size}"),
        format!(
            "Dependencies: {} in, {} out",
            record.in_degree, record.out_degree
        ),
        "-------------------".to_string(),
        "Centrality Metrics:".to_string(),
        format!("• Betweenness: {:.3}", record.betweenness.normalized),
        format!("• Eigenvector: {:.3}", record.eigenvector.normalized),
        format!("• PageRank: {:.3}", record.pagerank.normalized),
        "-------------------".to_string(),
        "Rankings:".to_string(),
    ];
    for (title, table) in ranks {
        if let Some(rank) = table.get(node.id()) {
            lines.push(format!("• {title}: #{rank}"));
        }
    }
    lines.join("\n")
}
