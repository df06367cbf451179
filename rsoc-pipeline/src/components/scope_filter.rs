use crate::config::TaskConfig;
use crate::error::PipelineResult;
use crate::filter::{Filter, FilterResult};
use crate::types::NormalizedRecord;

/// Keeps rows whose locale and author are both in the configured scope.
///
/// Runs before any aggregation, so out-of-scope rows contribute to
/// neither post totals nor creative selection. Always enabled: rows with a
/// blank locale or author are dropped even without explicit lists.
pub struct ScopeFilter;

impl Filter<TaskConfig, NormalizedRecord> for ScopeFilter {
    fn filter(
        &self,
        query: &TaskConfig,
        candidates: Vec<NormalizedRecord>,
    ) -> PipelineResult<FilterResult<NormalizedRecord>> {
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|r| query.allows_locale(&r.locale) && query.allows_author(&r.author_name));

        Ok(FilterResult { kept, removed })
    }
}
