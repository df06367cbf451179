use crate::config::TaskConfig;
use crate::error::PipelineResult;
use crate::filter::{Filter, FilterResult};
use crate::types::CreativeSelection;

/// Keeps creatives whose own ROI tier is in `TaskConfig::creative_tiers`.
pub struct CreativeTierFilter;

impl Filter<TaskConfig, CreativeSelection> for CreativeTierFilter {
    fn filter(
        &self,
        query: &TaskConfig,
        candidates: Vec<CreativeSelection>,
    ) -> PipelineResult<FilterResult<CreativeSelection>> {
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| query.allows_creative_tier(c.tier));

        Ok(FilterResult { kept, removed })
    }
}
