use crate::config::TaskConfig;
use crate::error::PipelineResult;
use crate::filter::{Filter, FilterResult};
use crate::types::PostAggregate;

/// Keeps posts whose total-ROI tier is in `TaskConfig::post_tiers`.
pub struct PostTierFilter;

impl Filter<TaskConfig, PostAggregate> for PostTierFilter {
    fn filter(
        &self,
        query: &TaskConfig,
        candidates: Vec<PostAggregate>,
    ) -> PipelineResult<FilterResult<PostAggregate>> {
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|p| query.allows_post_tier(p.tier));

        Ok(FilterResult { kept, removed })
    }
}
