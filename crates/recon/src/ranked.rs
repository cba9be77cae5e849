//! Top-N frequency rankings for downstream charts.

use std::collections::BTreeMap;

use crate::model::RankedEntry;

/// Order (label, count) pairs descending by count, ties broken by ascending
/// label, and keep the first `n`. Deterministic total order.
pub fn top_n(counts: &BTreeMap<String, usize>, n: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = counts
        .iter()
        .map(|(label, &count)| RankedEntry {
            label: label.clone(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries.truncate(n);
    entries
}
