//! Managed tag labels and classification of existing Radarr tags.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::Tag;

static RE_NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// Strip every character outside `[A-Za-z0-9]` and lowercase the rest.
pub fn normalize_provider(name: &str) -> String {
    RE_NON_ALNUM.replace_all(name, "").to_lowercase()
}

/// The managed tag label for a provider: `lowercase(prefix + stripped name)`.
pub fn tag_label(prefix: &str, provider_name: &str) -> String {
    format!("{prefix}{}", RE_NON_ALNUM.replace_all(provider_name, "")).to_lowercase()
}

/// Existing tags split by their role in a sync run.
///
/// `to_remove` holds every tag in the managed namespace and is cleared from
/// each movie before the matching `to_add` tags are put back, so `to_add` is
/// always a subset of `to_remove`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPlan {
    pub to_remove: Vec<Tag>,
    pub to_add: Vec<Tag>,
}

impl TagPlan {
    /// Find the tag in `to_add` carrying exactly `label`.
    pub fn addable(&self, label: &str) -> Option<&Tag> {
        self.to_add.iter().find(|t| t.label.eq_ignore_ascii_case(label))
    }
}

/// Split `existing` into the managed namespace and the tags that belong to a
/// required provider. `required_lower` must already be normalized.
pub fn classify_existing_tags(
    existing: &[Tag],
    required_lower: &[String],
    prefix: &str,
) -> TagPlan {
    let prefix = prefix.to_lowercase();
    let mut plan = TagPlan::default();

    for tag in existing {
        let label = tag.label.to_lowercase();
        if !label.contains(&prefix) {
            continue;
        }
        plan.to_remove.push(tag.clone());

        if let Some(rest) = label.strip_prefix(&prefix) {
            if required_lower.iter().any(|r| r == rest) {
                plan.to_add.push(tag.clone());
            }
        }
    }

    plan
}

/// `current` without any id present in `to_remove`. Ids that are not on the
/// movie are ignored.
pub fn remove_provider_tags(current: &[i64], to_remove: &[Tag]) -> Vec<i64> {
    current
        .iter()
        .copied()
        .filter(|id| !to_remove.iter().any(|t| t.id == *id))
        .collect()
}
