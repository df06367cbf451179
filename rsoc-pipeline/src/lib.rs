//! Turns ad performance rows into ranked creative-production tasks with pay.
//!
//! Rows are normalized, scoped, rolled up per post, tier-filtered and
//! ranked; each surviving post's qualifying creatives become one task.

pub mod aggregator;
pub mod components;
pub mod composer;
pub mod config;
pub mod error;
pub mod filter;
pub mod normalizer;
pub mod pipelines;
pub mod record_loader;
pub mod sanitize;
pub mod selector;
pub mod summary;
pub mod thresholds;
pub mod tier;
pub mod types;
pub mod util;

pub use config::{IdListStyle, MalformedRowPolicy, TaskConfig, TaskVariant};
pub use error::{PipelineError, PipelineResult};
pub use pipelines::task_generation::{generate_tasks, TaskGenerationPipeline};
pub use tier::{classify_tier, tier_glyph};
pub use types::{RawRecord, TaskBatch, TaskRecord, Tier};
