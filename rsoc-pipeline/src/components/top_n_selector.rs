use crate::config::TaskConfig;
use crate::selector::Selector;
use crate::types::PostAggregate;

/// Ranks posts by total ROI and keeps the configured top N.
pub struct TopNSelector;

impl Selector<TaskConfig, PostAggregate> for TopNSelector {
    fn score(&self, candidate: &PostAggregate) -> f64 {
        candidate.total_roi
    }

    fn size(&self, query: &TaskConfig) -> Option<usize> {
        Some(query.top_n)
    }
}
