/// Extract a short type name from the full module path.
///
/// Given `"rsoc_pipeline::components::top_n_selector::TopNSelector"`,
/// returns `"TopNSelector"`.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}
