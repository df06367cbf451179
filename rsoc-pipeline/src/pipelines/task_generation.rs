use crate::aggregator::{aggregate_posts, dedupe_creatives, rows_by_post};
use crate::components::creative_tier_filter::CreativeTierFilter;
use crate::components::min_roi_filter::MinRoiFilter;
use crate::components::post_tier_filter::PostTierFilter;
use crate::components::scope_filter::ScopeFilter;
use crate::components::top_n_selector::TopNSelector;
use crate::composer::compose_task;
use crate::config::TaskConfig;
use crate::error::PipelineResult;
use crate::filter::{run_filters, Filter};
use crate::normalizer::normalize_batch;
use crate::selector::Selector;
use crate::summary::total_payment;
use crate::types::{CreativeSelection, NormalizedRecord, PostAggregate, RawRecord, TaskBatch};

/// The task generation pipeline.
///
/// Pipeline flow:
/// 1. Normalize ROI text fields (fail or skip malformed rows per config)
/// 2. ScopeFilter keeps rows in the selected locales/authors
/// 3. Aggregate scoped rows per post
/// 4. PostTierFilter keeps posts in the selected tiers
/// 5. TopNSelector ranks by total ROI (stable) and keeps the top N
/// 6. Per post: MinRoiFilter, de-duplicate creatives, CreativeTierFilter
/// 7. Compose a task for each post with creatives left, then total the pay
pub struct TaskGenerationPipeline {
    record_filters: Vec<Box<dyn Filter<TaskConfig, NormalizedRecord>>>,
    post_filters: Vec<Box<dyn Filter<TaskConfig, PostAggregate>>>,
    selector: TopNSelector,
    qualification_filters: Vec<Box<dyn Filter<TaskConfig, NormalizedRecord>>>,
    creative_filters: Vec<Box<dyn Filter<TaskConfig, CreativeSelection>>>,
}

impl Default for TaskGenerationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskGenerationPipeline {
    pub fn new() -> Self {
        Self {
            record_filters: vec![Box::new(ScopeFilter)],
            post_filters: vec![Box::new(PostTierFilter)],
            selector: TopNSelector,
            qualification_filters: vec![Box::new(MinRoiFilter::default())],
            creative_filters: vec![Box::new(CreativeTierFilter)],
        }
    }

    /// Run one batch. The same input and config always produce the same output.
    pub fn execute(&self, records: &[RawRecord], config: &TaskConfig) -> PipelineResult<TaskBatch> {
        config.validate()?;

        let (normalized, skipped_rows) = normalize_batch(records, config.malformed_rows)?;
        let scoped = run_filters(&self.record_filters, config, normalized)?.kept;

        let posts = aggregate_posts(&scoped)?;
        let posts_considered = posts.len();
        let eligible = run_filters(&self.post_filters, config, posts)?.kept;
        let selected = if self.selector.enable(config) {
            self.selector.select(config, eligible)
        } else {
            eligible
        };
        log::debug!(
            "{}: selected {} of {} posts",
            self.selector.name(),
            selected.len(),
            posts_considered
        );

        let mut rows = rows_by_post(&scoped);
        let mut tasks = Vec::with_capacity(selected.len());
        for post in &selected {
            let post_rows = rows.swap_remove(&post.original_post_id).unwrap_or_default();
            let qualifying = run_filters(&self.qualification_filters, config, post_rows)?.kept;
            let creatives = dedupe_creatives(&qualifying);
            let creatives = run_filters(&self.creative_filters, config, creatives)?.kept;

            match compose_task(post, &creatives, config.variant, config.id_list_style) {
                Some(task) => tasks.push(task),
                None => log::debug!("post {} has no qualifying creatives", post.original_post_id),
            }
        }

        let total_payment = total_payment(&tasks);
        if tasks.is_empty() {
            log::info!("no post or creative satisfied the selected filters");
        } else {
            log::info!("composed {} task(s), total payment ${}", tasks.len(), total_payment);
        }

        Ok(TaskBatch {
            tasks,
            total_payment,
            records_processed: records.len(),
            records_in_scope: scoped.len(),
            posts_considered,
            posts_selected: selected.len(),
            skipped_rows,
        })
    }
}

/// Run the default pipeline over `records`.
pub fn generate_tasks(records: &[RawRecord], config: &TaskConfig) -> PipelineResult<TaskBatch> {
    TaskGenerationPipeline::new().execute(records, config)
}
