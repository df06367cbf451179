//! Run configuration.
//!
//! Every knob the engine reads lives on `TaskConfig`; the engine is a pure
//! function of `(records, config)`. Omitted JSON fields take their defaults.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::thresholds::DEFAULT_TOP_N;
use crate::types::Tier;

/// Which description template a task uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskVariant {
    #[default]
    Internal,
    /// Partner-sourced: credits the partner website and asks for original wording.
    Partner,
}

/// How the creative id list is rendered on a task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdListStyle {
    /// `"a, b, c"`
    #[default]
    Inline,
    /// One creative per line with tier glyph and ROI.
    Annotated,
}

/// What to do with a row whose ROI text does not parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRowPolicy {
    #[default]
    Fail,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Allowed locales; `None` keeps every locale.
    pub locales: Option<Vec<String>>,
    /// Allowed creative authors; `None` keeps every author.
    pub authors: Option<Vec<String>>,
    pub top_n: usize,
    pub post_tiers: BTreeSet<Tier>,
    pub creative_tiers: BTreeSet<Tier>,
    pub variant: TaskVariant,
    pub id_list_style: IdListStyle,
    pub malformed_rows: MalformedRowPolicy,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            locales: None,
            authors: None,
            top_n: DEFAULT_TOP_N,
            post_tiers: Tier::SELECTABLE.into_iter().collect(),
            creative_tiers: Tier::SELECTABLE.into_iter().collect(),
            variant: TaskVariant::Internal,
            id_list_style: IdListStyle::Inline,
            malformed_rows: MalformedRowPolicy::Fail,
        }
    }
}

impl TaskConfig {
    pub fn from_json_str(json: &str) -> PipelineResult<Self> {
        let config: TaskConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> PipelineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.top_n == 0 {
            return Err(PipelineError::InvalidConfig(
                "top_n must be a positive integer".into(),
            ));
        }
        Ok(())
    }

    /// Whether a post tier passes the post-tier filter.
    pub fn allows_post_tier(&self, tier: Tier) -> bool {
        tier.is_selectable() && self.post_tiers.contains(&tier)
    }

    /// Whether a creative tier passes the creative-tier filter.
    pub fn allows_creative_tier(&self, tier: Tier) -> bool {
        tier.is_selectable() && self.creative_tiers.contains(&tier)
    }

    /// Rows without a locale are never in scope, even when every locale is allowed.
    pub fn allows_locale(&self, locale: &str) -> bool {
        !locale.trim().is_empty()
            && self
                .locales
                .as_ref()
                .map_or(true, |allowed| allowed.iter().any(|l| l == locale))
    }

    /// Rows without an author are never in scope, even when every author is allowed.
    pub fn allows_author(&self, author: &str) -> bool {
        !author.trim().is_empty()
            && self
                .authors
                .as_ref()
                .map_or(true, |allowed| allowed.iter().any(|a| a == author))
    }
}
