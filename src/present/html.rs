//! Interactive HTML page built on the vis-network widget.

use serde::Serialize;
use serde_json::json;

use super::style::NodeStyle;
use crate::config::VisualConfig;
use crate::error::Result;
use crate::graph::DependencyGraph;

const VIS_NETWORK_JS: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

#[derive(Serialize)]
struct EdgeJson<'a> {
    from: &'a str,
    to: &'a str,
}

/// Physics and interaction settings: force-atlas-2 layout, directed arrows,
/// hover tooltips and navigation buttons.
fn network_options() -> serde_json::Value {
    json!({
        "nodes": {
            "shape": "dot",
            "scaling": { "min": 10, "max": 30 },
            "font": { "size": 12, "face": "Tahoma" }
        },
        "edges": {
            "color": { "inherit": true },
            "smooth": { "type": "continuous" },
            "arrows": { "to": { "enabled": true, "scaleFactor": 0.5 } }
        },
        "physics": {
            "enabled": true,
            "solver": "forceAtlas2Based",
            "forceAtlas2Based": {
                "gravitationalConstant": -50,
                "centralGravity": 0.01,
                "springLength": 100,
                "springConstant": 0.08,
                "damping": 0.4,
                "avoidOverlap": 0.5
            },
            "stabilization": { "enabled": true, "iterations": 1000, "updateInterval": 25 }
        },
        "interaction": {
            "hover": true,
            "navigationButtons": true,
            "keyboard": true,
            "dragNodes": true,
            "dragView": true,
            "zoomView": true
        }
    })
}

/// Render a self-contained page with the nodes and edges embedded as JSON.
pub fn render_html(
    graph: &DependencyGraph,
    styles: &[NodeStyle],
    visual: &VisualConfig,
) -> Result<String> {
    let edges: Vec<EdgeJson<'_>> = graph
        .edges()
        .map(|(from, to)| EdgeJson { from, to })
        .collect();

    let nodes_json = script_safe(serde_json::to_string(styles)?);
    let edges_json = script_safe(serde_json::to_string(&edges)?);
    let options_json = serde_json::to_string(&network_options())?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Repository dependency graph</title>
<script src="{VIS_NETWORK_JS}"></script>
<style>
    html, body {{ height: 100%; margin: 0; padding: 0; }}
    body {{ background-color: {background}; }}
    #mynetwork {{ width: 100%; height: {height}; min-height: 100vh; }}
    .vis-network {{ outline: none; }}
    .vis-tooltip {{ white-space: pre; font-family: monospace; }}
</style>
</head>
<body>
<div id="mynetwork"></div>
<script type="text/javascript">
    var nodes = new vis.DataSet({nodes_json});
    var edges = new vis.DataSet({edges_json});
    var options = {options_json};
    options.nodes.font.color = "{font_color}";
    var container = document.getElementById("mynetwork");
    var network = new vis.Network(container, {{ nodes: nodes, edges: edges }}, options);
</script>
</body>
</html>
"#,
        background = visual.background,
        height = visual.height,
        font_color = visual.font_color,
    ))
}

/// Keep embedded JSON from closing the surrounding script element.
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}
