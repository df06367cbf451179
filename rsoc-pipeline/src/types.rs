use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input rows
// ---------------------------------------------------------------------------

/// One row of the ad performance export, numeric fields still as text.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawRecord {
    #[serde(rename = "Original Post ID")]
    pub original_post_id: String,
    #[serde(rename = "Ad Creative Id")]
    pub ad_creative_id: String,
    #[serde(rename = "Ad Creative Media Type")]
    pub ad_creative_media_type: String,
    #[serde(rename = "Ad Creative Author Name")]
    pub ad_creative_author_name: String,
    #[serde(rename = "Locale")]
    pub locale: String,
    #[serde(rename = "Website Name", default)]
    pub website_name: Option<String>,
    #[serde(rename = "Original Article Name", default)]
    pub original_article_name: Option<String>,
    /// Currency text, e.g. `"$1,012.50"`.
    #[serde(rename = "Search ROI")]
    pub search_roi: String,
    /// Percent text, e.g. `"12.5%"`.
    #[serde(rename = "Search ROI%")]
    pub search_roi_percent: String,
}

/// A row with its ROI fields parsed. Identifiers are already sanitized.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedRecord {
    /// 0-based position in the input batch.
    pub row: usize,
    pub original_post_id: String,
    pub ad_creative_id: String,
    pub media_type: MediaType,
    pub author_name: String,
    pub locale: String,
    pub website_name: Option<String>,
    pub article_name: Option<String>,
    pub search_roi: f64,
    pub search_roi_percent: f64,
    pub combined_score: f64,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Coarse ROI bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    High,
    Medium,
    Low,
    Unclassified,
}

impl Tier {
    /// The tiers a caller may select; Unclassified is never one of them.
    pub const SELECTABLE: [Tier; 3] = [Tier::High, Tier::Medium, Tier::Low];

    pub fn glyph(self) -> &'static str {
        match self {
            Tier::High => "\u{1f7e2}",
            Tier::Medium => "\u{1f7e1}",
            Tier::Low => "\u{1f7e0}",
            Tier::Unclassified => "",
        }
    }

    pub fn is_selectable(self) -> bool {
        !matches!(self, Tier::Unclassified)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::High => write!(f, "High"),
            Tier::Medium => write!(f, "Medium"),
            Tier::Low => write!(f, "Low"),
            Tier::Unclassified => write!(f, "Unclassified"),
        }
    }
}

/// Creative media type. Matching is case-insensitive; anything other than
/// image or video is kept verbatim and earns no pay.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MediaType {
    Image,
    Video,
    Other(String),
}

impl MediaType {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "image" => MediaType::Image,
            "video" => MediaType::Video,
            _ => MediaType::Other(value.trim().to_string()),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
            MediaType::Other(other) => write!(f, "{}", other),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Post-level rollup of every scoped row for one Original Post ID.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PostAggregate {
    pub original_post_id: String,
    pub total_roi: f64,
    pub mean_roi_percent: f64,
    pub tier: Tier,
    pub row_count: usize,
    /// First non-empty website attribution among the post's rows.
    pub website_name: Option<String>,
    /// First non-empty article name among the post's rows.
    pub article_name: Option<String>,
}

/// One de-duplicated creative within a post.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreativeSelection {
    pub original_post_id: String,
    pub ad_creative_id: String,
    pub media_type: MediaType,
    pub search_roi: f64,
    pub tier: Tier,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A creative as listed on a task.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreativeEntry {
    pub id: String,
    pub media_type: MediaType,
    pub roi: f64,
    pub tier: Tier,
}

/// A composed work assignment for one post.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskRecord {
    pub original_post_id: String,
    pub post_roi_total: f64,
    pub post_tier: Tier,
    pub article_name: Option<String>,
    pub creatives: Vec<CreativeEntry>,
    /// Creative ids rendered per the configured list style.
    pub id_list: String,
    pub image_count: u32,
    pub video_count: u32,
    pub description: String,
    pub total_pay: u32,
}

impl TaskRecord {
    pub fn pay_display(&self) -> String {
        format!("${}", self.total_pay)
    }
}

/// A row excluded under the skip policy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub column: String,
    pub value: String,
}

/// Everything one run produces.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TaskBatch {
    pub tasks: Vec<TaskRecord>,
    pub total_payment: u32,
    pub records_processed: usize,
    pub records_in_scope: usize,
    pub posts_considered: usize,
    pub posts_selected: usize,
    pub skipped_rows: Vec<SkippedRow>,
}

impl TaskBatch {
    /// True when no post/creative satisfied the filters.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
