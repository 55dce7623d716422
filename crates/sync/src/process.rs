//! Per-movie provider lookup and tag update.

use elsewherr_clients::{RadarrApi, TmdbApi};
use elsewherr_core::Config;
use elsewherr_core::tags::{self, TagPlan};
use elsewherr_core::types::Movie;
use tracing::{debug, error, info};

/// What happened to a single movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieOutcome {
    /// The provider lookup failed; the movie was left alone.
    LookupFailed,
    /// No flat-rate providers in the configured region.
    NoProviders,
    /// The computed tag set equals the current one.
    Unchanged { add: Vec<i64> },
    /// Dry run: the movie would have been written with `tags`.
    WouldUpdate { add: Vec<i64>, tags: Vec<i64> },
    Updated { add: Vec<i64>, tags: Vec<i64> },
    UpdateFailed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub movies: usize,
    pub lookup_failed: usize,
    pub no_providers: usize,
    pub unchanged: usize,
    pub would_update: usize,
    pub updated: usize,
    pub update_failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &MovieOutcome) {
        self.movies += 1;
        match outcome {
            MovieOutcome::LookupFailed => self.lookup_failed += 1,
            MovieOutcome::NoProviders => self.no_providers += 1,
            MovieOutcome::Unchanged { .. } => self.unchanged += 1,
            MovieOutcome::WouldUpdate { .. } => self.would_update += 1,
            MovieOutcome::Updated { .. } => self.updated += 1,
            MovieOutcome::UpdateFailed => self.update_failed += 1,
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} movies: {} updated, {} would update, {} unchanged, {} without providers, \
             {} lookup failures, {} update failures",
            self.movies,
            self.updated,
            self.would_update,
            self.unchanged,
            self.no_providers,
            self.lookup_failed,
            self.update_failed
        )
    }
}

/// All movies in Radarr. A listing failure is logged and yields no movies,
/// so the run finishes without processing anything.
pub async fn fetch_movies(radarr: &dyn RadarrApi) -> Vec<Movie> {
    match radarr.list_movies().await {
        Ok(movies) => {
            info!(count = movies.len(), "movies from Radarr");
            movies
        }
        Err(e) => {
            error!(error = %e, "error getting movies from Radarr");
            Vec::new()
        }
    }
}

/// Process movies strictly one after another.
pub async fn process_movies(
    tmdb: &dyn TmdbApi,
    radarr: &dyn RadarrApi,
    config: &Config,
    plan: &TagPlan,
    movies: &[Movie],
) -> RunSummary {
    let mut summary = RunSummary::default();
    for movie in movies {
        let outcome = process_movie(tmdb, radarr, config, plan, movie).await;
        summary.record(&outcome);
    }
    summary
}

pub async fn process_movie(
    tmdb: &dyn TmdbApi,
    radarr: &dyn RadarrApi,
    config: &Config,
    plan: &TagPlan,
    movie: &Movie,
) -> MovieOutcome {
    info!(title = %movie.title, tmdb_id = movie.tmdb_id, tags = ?movie.tags, "movie");

    let providers = match tmdb
        .watch_providers(movie.tmdb_id, &config.provider_region)
        .await
    {
        Ok(p) if p.is_empty() => {
            info!(
                title = %movie.title,
                region = %config.provider_region,
                "no flat-rate providers"
            );
            return MovieOutcome::NoProviders;
        }
        Ok(p) => p,
        Err(e) => {
            error!(title = %movie.title, error = %e, "error getting providers");
            return MovieOutcome::LookupFailed;
        }
    };
    info!(
        providers = ?providers.iter().map(|p| p.provider_name.as_str()).collect::<Vec<_>>(),
        "flat-rate providers"
    );

    let mut add = Vec::new();
    for provider in &providers {
        let label = tags::tag_label(&config.tag_prefix, &provider.provider_name);
        if let Some(tag) = plan.addable(&label) {
            if !add.contains(&tag.id) {
                if config.apply_changes {
                    info!(tag = %tag, "adding tag");
                } else {
                    info!(tag = %tag, "would add tag");
                }
                add.push(tag.id);
            }
        }
    }

    let updated_tags = updated_tag_set(&movie.tags, plan, &add);
    if updated_tags == movie.tags {
        debug!(title = %movie.title, "tags unchanged");
        return MovieOutcome::Unchanged { add };
    }

    let mut update = movie.clone();
    update.tags = updated_tags.clone();

    if !config.apply_changes {
        info!(title = %movie.title, tags = ?update.tags, "dry run: would update movie");
        return MovieOutcome::WouldUpdate {
            add,
            tags: updated_tags,
        };
    }

    match radarr.update_movie(&update).await {
        Ok(saved) => {
            info!(title = %movie.title, tags = ?saved.tags, "updated movie in Radarr");
            MovieOutcome::Updated {
                add,
                tags: updated_tags,
            }
        }
        Err(e) => {
            error!(title = %movie.title, error = %e, "error updating movie in Radarr");
            MovieOutcome::UpdateFailed
        }
    }
}

/// `current` with every managed tag cleared, then `add` appended.
pub fn updated_tag_set(current: &[i64], plan: &TagPlan, add: &[i64]) -> Vec<i64> {
    let mut tags = tags::remove_provider_tags(current, &plan.to_remove);
    for id in add {
        if !tags.contains(id) {
            tags.push(*id);
        }
    }
    tags
}
