//
//  summary.rs
//  repograph
//

use std::fmt;

use serde::Serialize;

use crate::graph::{DependencyGraph, NodeKind};
use crate::metrics::{CentralityMetrics, Metric};

/// Summary sections, in print order.
const SECTIONS: [(&str, Metric); 5] = [
    ("Most Central (Betweenness)", Metric::Betweenness),
    ("Most Influential (Eigenvector)", Metric::Eigenvector),
    ("Most Connected (PageRank)", Metric::PageRank),
    ("Most Used (In-Degree)", Metric::InDegree),
    ("Most Dependencies (Out-Degree)", Metric::OutDegree),
];

/// Top nodes per metric, printable as text or serializable as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceSummary {
    pub sections: Vec<SummarySection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySection {
    pub title: String,
    pub metric: Metric,
    pub entries: Vec<SummaryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub value: f64,
}

impl ImportanceSummary {
    /// Collect the `top_n` highest-ranked nodes for each metric.
    pub fn build(graph: &DependencyGraph, metrics: &CentralityMetrics, top_n: usize) -> Self {
        let sections = SECTIONS
            .iter()
            .map(|&(title, metric)| SummarySection {
                title: title.to_string(),
                metric,
                entries: metrics
                    .top_n(metric, top_n)
                    .into_iter()
                    .filter_map(|ranked| {
                        let node = graph.node(&ranked.id)?;
                        Some(SummaryEntry {
                            label: node.label().to_string(),
                            kind: node.kind(),
                            id: ranked.id,
                            value: ranked.value,
                        })
                    })
                    .collect(),
            })
            .collect();
        Self { sections }
    }
}

impl SummarySection {
    fn format_value(&self, value: f64) -> String {
        if self.metric.is_count() {
            format!("{value} connections")
        } else {
            format!("{value:.3}")
        }
    }
}

impl fmt::Display for ImportanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most Important Dependencies:")?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}:", section.title)?;
            for entry in &section.entries {
                let kind = match entry.kind {
                    NodeKind::File => "File",
                    NodeKind::External => "External",
                };
                writeln!(
                    f,
                    "  • {} ({}): {}",
                    entry.label,
                    kind,
                    section.format_value(entry.value)
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetricsConfig;
    use crate::metrics::compute_metrics;

    fn summary(top_n: usize) -> ImportanceSummary {
        let mut graph = DependencyGraph::new();
        let a = graph.add_file("app/a.py".to_string(), 10);
        let b = graph.add_file("app/b.py".to_string(), 10);
        let c = graph.add_file("app/c.py".to_string(), 10);
        let os = graph.add_external("os".to_string());
        graph.add_edge(a, b);
        graph.add_edge(b, os);
        graph.add_edge(c, os);
        let metrics = compute_metrics(&graph, &MetricsConfig::default()).metrics;
        ImportanceSummary::build(&graph, &metrics, top_n)
    }

    #[test]
    fn test_sections_in_order() {
        let summary = summary(5);
        let titles: Vec<&str> = summary.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Most Central (Betweenness)",
                "Most Influential (Eigenvector)",
                "Most Connected (PageRank)",
                "Most Used (In-Degree)",
                "Most Dependencies (Out-Degree)",
            ]
        );
    }

    #[test]
    fn test_top_n_limits_entries() {
        let summary = summary(2);
        assert!(summary.sections.iter().all(|s| s.entries.len() == 2));

        let used = &summary.sections[3];
        assert_eq!(used.entries[0].id, "os");
        assert_eq!(used.entries[0].kind, NodeKind::External);
        assert_eq!(used.entries[0].value, 2.0);
    }

    #[test]
    fn test_text_format() {
        let text = summary(1).to_string();
        assert!(text.starts_with("Most Important Dependencies:\n"));
        assert!(text.contains("\nMost Used (In-Degree):\n  • os (External): 2 connections\n"));
        assert!(text.contains("\nMost Dependencies (Out-Degree):\n  • a.py (File): 1 connections\n"));
    }

    #[test]
    fn test_scores_use_three_decimals() {
        let text = summary(1).to_string();
        let central = text
            .lines()
            .skip_while(|l| *l != "Most Central (Betweenness):")
            .nth(1)
            .unwrap();
        // app/b.py carries a.py -> os, scaled by 1 / (3 * 2)
        assert_eq!(central, "  • b.py (File): 0.167");
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(summary(1)).unwrap();
        assert_eq!(json["sections"][3]["metric"], "in_degree");
        assert_eq!(json["sections"][3]["entries"][0]["kind"], "external");
    }
}
