//! Ordering nodes by a metric.

use serde::Serialize;

use super::{CentralityMetrics, Metric};

/// One entry of a ranking: a node id and its raw value for the metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    pub id: String,
    pub value: f64,
}

impl CentralityMetrics {
    /// Every node ordered by descending raw value, ties broken by node id.
    pub fn ranking(&self, metric: Metric) -> Vec<RankedNode> {
        let mut ranked: Vec<RankedNode> = self
            .iter()
            .map(|(id, record)| RankedNode {
                id: id.to_string(),
                value: record.raw(metric),
            })
            .collect();
        // iter() yields ids in order, so a stable sort keeps ties sorted by id
        ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
        ranked
    }

    /// The first `n` entries of [`ranking`](Self::ranking).
    pub fn top_n(&self, metric: Metric, n: usize) -> Vec<RankedNode> {
        let mut ranked = self.ranking(metric);
        ranked.truncate(n);
        ranked
    }

    /// 1-based position of `id` in the ranking for `metric`.
    pub fn rank_of(&self, id: &str, metric: Metric) -> Option<usize> {
        self.ranking(metric)
            .iter()
            .position(|r| r.id == id)
            .map(|pos| pos + 1)
    }
}
