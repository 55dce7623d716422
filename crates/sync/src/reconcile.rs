//! Managed tag vocabulary in Radarr.

use elsewherr_clients::RadarrApi;
use elsewherr_core::tags::{self, TagPlan};
use tracing::{error, info};

use crate::SyncError;

pub fn required_providers_lower(required: &[String]) -> Vec<String> {
    required.iter().map(|p| tags::normalize_provider(p)).collect()
}

/// Ask Radarr to create a tag for every required provider.
///
/// Radarr ignores labels it already has. A failed creation is logged and the
/// remaining providers are still attempted. Returns how many requests
/// succeeded.
pub async fn ensure_provider_tags(
    radarr: &dyn RadarrApi,
    required: &[String],
    prefix: &str,
) -> usize {
    let mut created = 0;

    for provider in required {
        let label = tags::tag_label(prefix, provider);
        match radarr.create_tag(&label).await {
            Ok(tag) => {
                info!(provider = %provider, tag = %tag, "provider tag ensured");
                created += 1;
            }
            Err(e) => {
                error!(
                    provider = %provider,
                    label = %label,
                    error = %e,
                    "error creating provider tag"
                );
            }
        }
    }

    created
}

/// List Radarr's tags and classify them. The run cannot continue without the
/// tag list, so a listing failure is returned to the caller.
pub async fn load_tag_plan(
    radarr: &dyn RadarrApi,
    required_lower: &[String],
    prefix: &str,
) -> Result<TagPlan, SyncError> {
    let existing = radarr.list_tags().await.map_err(|e| {
        error!(error = %e, "error getting tags");
        SyncError::Radarr(e)
    })?;
    info!(count = existing.len(), "existing tags");

    let plan = tags::classify_existing_tags(&existing, required_lower, prefix);
    info!(
        to_remove = ?plan.to_remove.iter().map(|t| t.label.as_str()).collect::<Vec<_>>(),
        to_add = ?plan.to_add.iter().map(|t| t.label.as_str()).collect::<Vec<_>>(),
        "classified provider tags"
    );
    Ok(plan)
}
