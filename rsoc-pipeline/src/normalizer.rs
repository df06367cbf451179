//! ROI field normalization.
//!
//! Strips currency/percent decorations from the text columns, parses them,
//! and computes the combined score. Malformed text is an error, never zero.

use crate::config::MalformedRowPolicy;
use crate::error::{PipelineError, PipelineResult};
use crate::sanitize::sanitize_identifier;
use crate::types::{MediaType, NormalizedRecord, RawRecord, SkippedRow};

pub const SEARCH_ROI_COLUMN: &str = "Search ROI";
pub const SEARCH_ROI_PERCENT_COLUMN: &str = "Search ROI%";

/// Parse `text` after removing every char in `decorations`.
/// Returns `None` for empty, non-numeric, or non-finite residue.
fn parse_decorated(text: &str, decorations: &[char]) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| !decorations.contains(c)).collect();
    let value: f64 = cleaned.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Parse a currency cell such as `"$1,012.50"`.
pub fn parse_currency(text: &str) -> Option<f64> {
    parse_decorated(text, &['$', ','])
}

/// Parse a percent cell such as `"12.5%"`.
pub fn parse_percent(text: &str) -> Option<f64> {
    parse_decorated(text, &['%', ','])
}

/// Normalize one row. `row` is its 0-based index in the batch.
pub fn normalize_record(row: usize, raw: &RawRecord) -> PipelineResult<NormalizedRecord> {
    let search_roi = parse_currency(&raw.search_roi).ok_or_else(|| {
        PipelineError::MalformedNumericField {
            row,
            column: SEARCH_ROI_COLUMN.to_string(),
            value: raw.search_roi.clone(),
        }
    })?;
    let search_roi_percent = parse_percent(&raw.search_roi_percent).ok_or_else(|| {
        PipelineError::MalformedNumericField {
            row,
            column: SEARCH_ROI_PERCENT_COLUMN.to_string(),
            value: raw.search_roi_percent.clone(),
        }
    })?;

    Ok(NormalizedRecord {
        row,
        original_post_id: sanitize_identifier(&raw.original_post_id),
        ad_creative_id: sanitize_identifier(&raw.ad_creative_id),
        media_type: MediaType::parse(&raw.ad_creative_media_type),
        author_name: raw.ad_creative_author_name.clone(),
        locale: raw.locale.clone(),
        website_name: non_empty(raw.website_name.as_deref()),
        article_name: non_empty(raw.original_article_name.as_deref()),
        search_roi,
        search_roi_percent,
        combined_score: search_roi + search_roi_percent,
    })
}

/// Normalize a whole batch.
///
/// Under `Fail` the first malformed row aborts the batch. Under `Skip` the
/// row is dropped and reported in the returned list.
pub fn normalize_batch(
    raws: &[RawRecord],
    policy: MalformedRowPolicy,
) -> PipelineResult<(Vec<NormalizedRecord>, Vec<SkippedRow>)> {
    let mut records = Vec::with_capacity(raws.len());
    let mut skipped = Vec::new();

    for (row, raw) in raws.iter().enumerate() {
        match normalize_record(row, raw) {
            Ok(record) => records.push(record),
            Err(PipelineError::MalformedNumericField { row, column, value })
                if policy == MalformedRowPolicy::Skip =>
            {
                log::warn!(
                    "skipping row {}: malformed {} value '{}'",
                    row,
                    column,
                    value
                );
                skipped.push(SkippedRow { row, column, value });
            }
            Err(e) => return Err(e),
        }
    }

    Ok((records, skipped))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(roi: &str, pct: &str) -> RawRecord {
        RawRecord {
            original_post_id: "=\"111\"".into(),
            ad_creative_id: "=\"900\"".into(),
            ad_creative_media_type: "Image".into(),
            ad_creative_author_name: "Ana".into(),
            locale: "en-US".into(),
            search_roi: roi.into(),
            search_roi_percent: pct.into(),
            ..RawRecord::default()
        }
    }

    #[test]
    fn strips_decorations_and_sums_score() {
        let record = normalize_record(0, &raw("$1,012.50", "12.5%")).unwrap();
        assert!((record.search_roi - 1012.5).abs() < 1e-9);
        assert!((record.search_roi_percent - 12.5).abs() < 1e-9);
        assert!((record.combined_score - 1025.0).abs() < 1e-9);
        assert_eq!(record.original_post_id, "111");
        assert_eq!(record.ad_creative_id, "900");
        assert_eq!(record.media_type, MediaType::Image);
    }

    #[test]
    fn negative_values_parse() {
        let record = normalize_record(0, &raw("-$3.25", "-1,200%")).unwrap();
        assert!((record.search_roi + 3.25).abs() < 1e-9);
        assert!((record.search_roi_percent + 1200.0).abs() < 1e-9);
    }

    #[test]
    fn empty_roi_is_an_error_not_zero() {
        let err = normalize_record(7, &raw("", "1%")).unwrap_err();
        match err {
            PipelineError::MalformedNumericField { row, column, value } => {
                assert_eq!(row, 7);
                assert_eq!(column, SEARCH_ROI_COLUMN);
                assert_eq!(value, "");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_percent_is_an_error() {
        let err = normalize_record(2, &raw("$4", "n/a")).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MalformedNumericField { ref column, .. } if column == SEARCH_ROI_PERCENT_COLUMN
        ));
    }

    #[test]
    fn non_finite_text_is_rejected() {
        assert!(parse_currency("NaN").is_none());
        assert!(parse_currency("inf").is_none());
        assert!(parse_percent("$").is_none());
    }

    #[test]
    fn fail_policy_aborts_batch() {
        let raws = vec![raw("$1", "1%"), raw("oops", "1%")];
        assert!(normalize_batch(&raws, MalformedRowPolicy::Fail).is_err());
    }

    #[test]
    fn skip_policy_reports_offending_rows() {
        let raws = vec![raw("$1", "1%"), raw("oops", "1%"), raw("$2", "2%")];
        let (records, skipped) = normalize_batch(&raws, MalformedRowPolicy::Skip).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].row, 2);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].row, 1);
        assert_eq!(skipped[0].value, "oops");
    }

    #[test]
    fn blank_attribution_becomes_none() {
        let mut r = raw("$1", "1%");
        r.website_name = Some("   ".into());
        r.original_article_name = Some("Best Hikes".into());
        let record = normalize_record(0, &r).unwrap();
        assert_eq!(record.website_name, None);
        assert_eq!(record.article_name.as_deref(), Some("Best Hikes"));
    }
}
