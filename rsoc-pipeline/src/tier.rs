//! ROI tier classification.
//!
//! `classify_tier` is the only place the tier boundaries are evaluated;
//! `tier_glyph` goes through it so label and glyph never disagree.

use crate::thresholds::{HIGH_TIER_MIN_ROI, LOW_TIER_MIN_ROI, MEDIUM_TIER_MIN_ROI};
use crate::types::Tier;

/// Map an ROI value to its tier. Boundaries are inclusive on the lower end.
pub fn classify_tier(roi: f64) -> Tier {
    if roi >= HIGH_TIER_MIN_ROI {
        Tier::High
    } else if roi >= MEDIUM_TIER_MIN_ROI {
        Tier::Medium
    } else if roi >= LOW_TIER_MIN_ROI {
        Tier::Low
    } else {
        Tier::Unclassified
    }
}

/// Display glyph for an ROI value; empty for Unclassified.
pub fn tier_glyph(roi: f64) -> &'static str {
    classify_tier(roi).glyph()
}
