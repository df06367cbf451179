//! Fixed business constants for tier classification and task pay.
//!
//! Changing a threshold here affects BOTH tier classification (`tier.rs`)
//! and creative qualification (`aggregator.rs`).

/// ROI at or above which a post or creative is High tier.
pub const HIGH_TIER_MIN_ROI: f64 = 51.0;

/// ROI at or above which a post or creative is Medium tier.
pub const MEDIUM_TIER_MIN_ROI: f64 = 21.0;

/// ROI at or above which a post or creative is Low tier. Anything below is
/// Unclassified.
pub const LOW_TIER_MIN_ROI: f64 = 5.0;

/// Minimum per-row ROI for a creative to qualify for a task, applied
/// before any creative-tier filtering.
pub const MIN_CREATIVE_ROI: f64 = 5.0;

/// Inspired variants requested per qualifying source creative.
pub const VARIANTS_PER_CREATIVE: u32 = 2;

/// Pay per produced image variant.
pub const IMAGE_RATE: u32 = 1;

/// Pay per produced video variant.
pub const VIDEO_RATE: u32 = 3;

/// Number of top posts retained when the caller does not say otherwise.
pub const DEFAULT_TOP_N: usize = 5;
