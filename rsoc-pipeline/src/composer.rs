//! Task composition: pay, creative-count phrasing, and the description.

use crate::config::{IdListStyle, TaskVariant};
use crate::thresholds::{IMAGE_RATE, VARIANTS_PER_CREATIVE, VIDEO_RATE};
use crate::types::{CreativeEntry, CreativeSelection, MediaType, PostAggregate, TaskRecord};

/// Placeholder the partner template leaves for the upload location.
pub const UPLOAD_LINK_PLACEHOLDER: &str = "[UPLOAD LINK]";

/// Image and video creatives among a post's qualifying set.
/// Other media types count toward neither.
pub fn count_media(creatives: &[CreativeSelection]) -> (u32, u32) {
    creatives
        .iter()
        .fold((0, 0), |(images, videos), c| match c.media_type {
            MediaType::Image => (images + 1, videos),
            MediaType::Video => (images, videos + 1),
            MediaType::Other(_) => (images, videos),
        })
}

/// Each source creative asks for two variants: 1 per image, 3 per video.
pub fn compute_pay(image_count: u32, video_count: u32) -> u32 {
    image_count * VARIANTS_PER_CREATIVE * IMAGE_RATE + video_count * VARIANTS_PER_CREATIVE * VIDEO_RATE
}

/// `"4 inspired images and 2 inspired videos"`.
///
/// The singular form only applies when the doubled count is exactly 1,
/// which no positive creative count can produce.
pub fn creative_phrase(image_count: u32, video_count: u32) -> String {
    let mut parts = Vec::new();
    if image_count > 0 {
        parts.push(inspired(image_count * VARIANTS_PER_CREATIVE, "image"));
    }
    if video_count > 0 {
        parts.push(inspired(video_count * VARIANTS_PER_CREATIVE, "video"));
    }
    parts.join(" and ")
}

fn inspired(count: u32, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{} inspired {}{}", count, noun, suffix)
}

/// `"ID"` for a single identifier, `"IDs"` otherwise.
pub fn id_label(count: usize) -> &'static str {
    if count == 1 {
        "ID"
    } else {
        "IDs"
    }
}

/// Render creative ids in the requested style.
pub fn render_id_list(creatives: &[CreativeEntry], style: IdListStyle) -> String {
    match style {
        IdListStyle::Inline => creatives
            .iter()
            .map(|c| c.id.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        IdListStyle::Annotated => creatives
            .iter()
            .map(|c| {
                let glyph = c.tier.glyph();
                if glyph.is_empty() {
                    format!("{} (${:.2})", c.id, c.roi)
                } else {
                    format!("{} {} (${:.2})", glyph, c.id, c.roi)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Build the task description.
///
/// Partner phrasing needs a website to credit; without one the internal
/// template is used.
pub fn compose_description(
    variant: TaskVariant,
    website: Option<&str>,
    phrase: &str,
    id_count: usize,
    inline_ids: &str,
) -> String {
    let label = id_label(id_count);
    match (variant, website) {
        (TaskVariant::Partner, Some(site)) if !site.is_empty() => format!(
            "Based on {}'s article, please create {} based on Ad Creative {} {}. \
             Do not copy the article word for word; write the content in your own words.\n\
             Upload link: {}",
            site, phrase, label, inline_ids, UPLOAD_LINK_PLACEHOLDER
        ),
        _ => format!(
            "Please create {} based on Ad Creative {} {}. Please focus on policy compliancy.",
            phrase, label, inline_ids
        ),
    }
}

/// Assemble the task for one post from its qualifying creatives.
///
/// Returns `None` when no creative qualified.
pub fn compose_task(
    post: &PostAggregate,
    creatives: &[CreativeSelection],
    variant: TaskVariant,
    style: IdListStyle,
) -> Option<TaskRecord> {
    if creatives.is_empty() {
        return None;
    }

    let (image_count, video_count) = count_media(creatives);
    let entries: Vec<CreativeEntry> = creatives
        .iter()
        .map(|c| CreativeEntry {
            id: c.ad_creative_id.clone(),
            media_type: c.media_type.clone(),
            roi: c.search_roi,
            tier: c.tier,
        })
        .collect();

    let phrase = creative_phrase(image_count, video_count);
    let inline_ids = render_id_list(&entries, IdListStyle::Inline);
    let description = compose_description(
        variant,
        post.website_name.as_deref(),
        &phrase,
        entries.len(),
        &inline_ids,
    );
    let id_list = match style {
        IdListStyle::Inline => inline_ids,
        IdListStyle::Annotated => render_id_list(&entries, style),
    };

    Some(TaskRecord {
        original_post_id: post.original_post_id.clone(),
        post_roi_total: post.total_roi,
        post_tier: post.tier,
        article_name: post.article_name.clone(),
        creatives: entries,
        id_list,
        image_count,
        video_count,
        description,
        total_pay: compute_pay(image_count, video_count),
    })
}
