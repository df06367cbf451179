use crate::error::PipelineResult;
use crate::util;

/// Result of a filter operation, partitioning candidates into kept and removed.
pub struct FilterResult<C> {
    pub kept: Vec<C>,
    pub removed: Vec<C>,
}

/// Filters run sequentially and partition candidates into kept and removed sets.
pub trait Filter<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this filter should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Filter candidates by evaluating each against some criteria.
    /// Kept candidates continue to the next stage in their original
    /// relative order; removed candidates are excluded.
    fn filter(&self, query: &Q, candidates: Vec<C>) -> PipelineResult<FilterResult<C>>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}

/// Run `filters` in order, skipping disabled ones.
pub fn run_filters<Q, C>(
    filters: &[Box<dyn Filter<Q, C>>],
    query: &Q,
    candidates: Vec<C>,
) -> PipelineResult<FilterResult<C>>
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    let mut kept = candidates;
    let mut removed = Vec::new();

    for filter in filters.iter().filter(|f| f.enable(query)) {
        let result = filter.filter(query, kept)?;
        log::debug!(
            "{}: kept {} removed {}",
            filter.name(),
            result.kept.len(),
            result.removed.len()
        );
        kept = result.kept;
        removed.extend(result.removed);
    }

    Ok(FilterResult { kept, removed })
}
