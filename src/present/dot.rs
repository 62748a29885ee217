//! Graphviz DOT output for `--static`.

use std::fmt::Write;

use super::style::NodeStyle;
use crate::graph::DependencyGraph;

/// Render the graph as DOT text with the same colors and sizes as the
/// interactive page. Node sizes (in vis-network pixels) map to inches at 1/40.
pub fn render_dot(graph: &DependencyGraph, styles: &[NodeStyle]) -> String {
    let mut out = String::new();
    out.push_str("digraph dependencies {\n");
    out.push_str("    graph [overlap=false, splines=true];\n");
    out.push_str("    node [shape=circle, style=filled, fontname=\"Tahoma\", fontsize=10];\n");
    out.push_str("    edge [arrowsize=0.5];\n");

    for style in styles {
        let _ = writeln!(
            out,
            "    \"{}\" [label=\"{}\", fillcolor=\"{}\", width={:.2}, tooltip=\"{}\"];",
            escape(&style.id),
            escape(&style.label),
            escape(&style.color),
            style.size / 40.0,
            escape(&style.title),
        );
    }

    let mut edges = graph.edge_list();
    edges.dedup();
    for (from, to) in edges {
        let _ = writeln!(out, "    \"{}\" -> \"{}\";", escape(&from), escape(&to));
    }

    out.push_str("}\n");
    out
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
