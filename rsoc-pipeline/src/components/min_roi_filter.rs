use crate::config::TaskConfig;
use crate::error::PipelineResult;
use crate::filter::{Filter, FilterResult};
use crate::thresholds::MIN_CREATIVE_ROI;
use crate::types::NormalizedRecord;

/// Drops rows below the minimum per-creative ROI.
///
/// Applied to a post's rows before creative de-duplication, independent of
/// any tier filter.
pub struct MinRoiFilter {
    pub min_roi: f64,
}

impl MinRoiFilter {
    pub fn new(min_roi: f64) -> Self {
        Self { min_roi }
    }
}

impl Default for MinRoiFilter {
    fn default() -> Self {
        Self {
            min_roi: MIN_CREATIVE_ROI,
        }
    }
}

impl Filter<TaskConfig, NormalizedRecord> for MinRoiFilter {
    fn filter(
        &self,
        _query: &TaskConfig,
        candidates: Vec<NormalizedRecord>,
    ) -> PipelineResult<FilterResult<NormalizedRecord>> {
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|r| r.search_roi >= self.min_roi);

        Ok(FilterResult { kept, removed })
    }
}
