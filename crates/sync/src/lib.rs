pub mod process;
pub mod reconcile;
pub mod reference;

use elsewherr_clients::{ClientError, RadarrApi, TmdbApi};
use elsewherr_core::Config;
use thiserror::Error;
use tracing::info;

pub use process::{MovieOutcome, RunSummary};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("radarr: {0}")]
    Radarr(#[source] ClientError),
    #[error("tmdb: {0}")]
    Tmdb(#[source] ClientError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One full tag sync: create provider tags, classify existing tags, then
/// walk every movie. Fails only when the tag list cannot be read.
pub async fn run(
    config: &Config,
    tmdb: &dyn TmdbApi,
    radarr: &dyn RadarrApi,
) -> Result<RunSummary, SyncError> {
    let required_lower = reconcile::required_providers_lower(&config.required_providers);
    info!(required = ?required_lower, "required providers");

    reconcile::ensure_provider_tags(radarr, &config.required_providers, &config.tag_prefix).await;
    let plan = reconcile::load_tag_plan(radarr, &required_lower, &config.tag_prefix).await?;

    let movies = process::fetch_movies(radarr).await;

    info!(
        movies = movies.len(),
        dry_run = !config.apply_changes,
        "working on all movies in turn"
    );
    let summary = process::process_movies(tmdb, radarr, config, &plan, &movies).await;
    info!(%summary, "sync finished");
    Ok(summary)
}
