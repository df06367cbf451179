//! Post-level and creative-level aggregation.
//!
//! Both passes key on sanitized identifiers and keep first-appearance
//! order through `IndexMap`, so ties in later stable sorts fall back to
//! input order.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::{PipelineError, PipelineResult};
use crate::normalizer::{SEARCH_ROI_COLUMN, SEARCH_ROI_PERCENT_COLUMN};
use crate::tier::classify_tier;
use crate::types::{CreativeSelection, NormalizedRecord, PostAggregate};

struct PostAccumulator {
    total_roi: f64,
    roi_percent_sum: f64,
    row_count: usize,
    website_name: Option<String>,
    article_name: Option<String>,
}

/// Group rows by post: sum of ROI, mean of ROI%, tier of the sum.
///
/// Output order is the order in which each post first appears. A sum that
/// overflows to infinity is reported against the row that pushed it there.
pub fn aggregate_posts(records: &[NormalizedRecord]) -> PipelineResult<Vec<PostAggregate>> {
    let mut groups: IndexMap<&str, PostAccumulator> = IndexMap::new();

    for record in records {
        let acc = groups
            .entry(record.original_post_id.as_str())
            .or_insert_with(|| PostAccumulator {
                total_roi: 0.0,
                roi_percent_sum: 0.0,
                row_count: 0,
                website_name: None,
                article_name: None,
            });
        acc.total_roi += record.search_roi;
        acc.roi_percent_sum += record.search_roi_percent;
        if !acc.total_roi.is_finite() {
            return Err(overflow(record, SEARCH_ROI_COLUMN, record.search_roi));
        }
        if !acc.roi_percent_sum.is_finite() {
            return Err(overflow(record, SEARCH_ROI_PERCENT_COLUMN, record.search_roi_percent));
        }
        acc.row_count += 1;
        if acc.website_name.is_none() {
            acc.website_name = record.website_name.clone();
        }
        if acc.article_name.is_none() {
            acc.article_name = record.article_name.clone();
        }
    }

    Ok(groups
        .into_iter()
        .map(|(post_id, acc)| PostAggregate {
            original_post_id: post_id.to_string(),
            total_roi: acc.total_roi,
            mean_roi_percent: acc.roi_percent_sum / acc.row_count as f64,
            tier: classify_tier(acc.total_roi),
            row_count: acc.row_count,
            website_name: acc.website_name,
            article_name: acc.article_name,
        })
        .collect())
}

fn overflow(record: &NormalizedRecord, column: &str, value: f64) -> PipelineError {
    PipelineError::MalformedNumericField {
        row: record.row,
        column: column.to_string(),
        value: format!("{} (post {} total is not finite)", value, record.original_post_id),
    }
}

/// Bucket rows by post id, preserving row order within each bucket.
pub fn rows_by_post(records: &[NormalizedRecord]) -> IndexMap<String, Vec<NormalizedRecord>> {
    let mut groups: IndexMap<String, Vec<NormalizedRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry(record.original_post_id.clone())
            .or_default()
            .push(record.clone());
    }
    groups
}

/// Collapse rows to one entry per creative; the first row seen for a
/// creative supplies its media type and ROI.
pub fn dedupe_creatives(rows: &[NormalizedRecord]) -> Vec<CreativeSelection> {
    let mut creatives: IndexMap<&str, CreativeSelection> = IndexMap::new();

    for row in rows {
        if let Entry::Vacant(slot) = creatives.entry(row.ad_creative_id.as_str()) {
            slot.insert(CreativeSelection {
                original_post_id: row.original_post_id.clone(),
                ad_creative_id: row.ad_creative_id.clone(),
                media_type: row.media_type.clone(),
                search_roi: row.search_roi,
                tier: classify_tier(row.search_roi),
            });
        }
    }

    creatives.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MediaType, Tier};

    fn row(idx: usize, post: &str, creative: &str, media: &str, roi: f64, pct: f64) -> NormalizedRecord {
        NormalizedRecord {
            row: idx,
            original_post_id: post.into(),
            ad_creative_id: creative.into(),
            media_type: MediaType::parse(media),
            author_name: "Ana".into(),
            locale: "en-US".into(),
            website_name: None,
            article_name: None,
            search_roi: roi,
            search_roi_percent: pct,
            combined_score: roi + pct,
        }
    }

    #[test]
    fn posts_sum_roi_and_average_percent() {
        let records = vec![
            row(0, "P1", "c1", "image", 10.0, 4.0),
            row(1, "P2", "c9", "video", 2.0, 1.0),
            row(2, "P1", "c2", "image", 15.0, 8.0),
            row(3, "P1", "c3", "video", 30.0, 12.0),
        ];
        let posts = aggregate_posts(&records).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].original_post_id, "P1");
        assert!((posts[0].total_roi - 55.0).abs() < 1e-9);
        assert!((posts[0].mean_roi_percent - 8.0).abs() < 1e-9);
        assert_eq!(posts[0].tier, Tier::High);
        assert_eq!(posts[0].row_count, 3);
        assert_eq!(posts[1].tier, Tier::Unclassified);
    }

    #[test]
    fn first_non_empty_attribution_wins() {
        let mut a = row(0, "P1", "c1", "image", 10.0, 0.0);
        let mut b = row(1, "P1", "c2", "image", 10.0, 0.0);
        let mut c = row(2, "P1", "c3", "image", 10.0, 0.0);
        b.website_name = Some("SiteB".into());
        c.website_name = Some("SiteC".into());
        a.article_name = Some("Article A".into());
        let posts = aggregate_posts(&[a, b, c]).unwrap();
        assert_eq!(posts[0].website_name.as_deref(), Some("SiteB"));
        assert_eq!(posts[0].article_name.as_deref(), Some("Article A"));
    }

    #[test]
    fn overflowing_post_total_is_rejected() {
        let records = vec![
            row(0, "P1", "c1", "image", 1e308, 0.0),
            row(1, "P1", "c2", "image", 1e308, 0.0),
        ];
        match aggregate_posts(&records).unwrap_err() {
            PipelineError::MalformedNumericField { row, column, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, SEARCH_ROI_COLUMN);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn first_occurrence_of_creative_wins() {
        let rows = vec![
            row(0, "P1", "c1", "image", 12.0, 0.0),
            row(1, "P1", "c2", "video", 40.0, 0.0),
            row(2, "P1", "c1", "video", 90.0, 0.0),
        ];
        let creatives = dedupe_creatives(&rows);
        assert_eq!(creatives.len(), 2);
        assert_eq!(creatives[0].ad_creative_id, "c1");
        assert_eq!(creatives[0].media_type, MediaType::Image);
        assert!((creatives[0].search_roi - 12.0).abs() < 1e-9);
        assert_eq!(creatives[0].tier, Tier::Low);
        assert_eq!(creatives[1].ad_creative_id, "c2");
        assert_eq!(creatives[1].tier, Tier::Medium);
    }

    #[test]
    fn rows_are_bucketed_in_first_seen_order() {
        let records = vec![
            row(0, "P2", "c1", "image", 1.0, 0.0),
            row(1, "P1", "c2", "image", 1.0, 0.0),
            row(2, "P2", "c3", "image", 1.0, 0.0),
        ];
        let buckets = rows_by_post(&records);
        let keys: Vec<&str> = buckets.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["P2", "P1"]);
        assert_eq!(buckets["P2"].len(), 2);
        assert_eq!(buckets["P2"][1].row, 2);
    }
}
