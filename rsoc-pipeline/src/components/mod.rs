pub mod creative_tier_filter;
pub mod min_roi_filter;
pub mod post_tier_filter;
pub mod scope_filter;
pub mod top_n_selector;
