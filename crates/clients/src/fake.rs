//! In-memory implementations of [`TmdbApi`] and [`RadarrApi`].
//!
//! Both record every call so orchestration code can be tested without a
//! network, and both can be told to fail specific calls.

use std::collections::{HashMap, HashSet};

use elsewherr_core::types::{Movie, Provider, Tag};
use tokio::sync::Mutex;

use crate::radarr::RadarrApi;
use crate::tmdb::{ReferenceList, TmdbApi, parse_flatrate};
use crate::ClientError;

fn injected(what: &str) -> ClientError {
    ClientError::Network(format!("injected failure: {what}"))
}

/// Fake TMDB keyed by TMDB movie id. Responses are raw watch-provider JSON
/// so region and `flatrate` lookup behave as they do against the real API.
#[derive(Default)]
pub struct FakeTmdb {
    responses: HashMap<i64, serde_json::Value>,
    failing_movies: HashSet<i64>,
    references: HashMap<ReferenceList, Vec<serde_json::Value>>,
    failing_references: HashSet<ReferenceList>,
    lookups: Mutex<Vec<i64>>,
    reference_lookups: Mutex<Vec<ReferenceList>>,
}

impl FakeTmdb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream `tmdb_id` on `providers` (flat-rate) in `region`.
    pub fn with_flatrate(mut self, tmdb_id: i64, region: &str, providers: &[&str]) -> Self {
        let flatrate: Vec<_> = providers
            .iter()
            .map(|p| serde_json::json!({ "provider_name": p }))
            .collect();
        let mut results = serde_json::Map::new();
        results.insert(region.to_string(), serde_json::json!({ "flatrate": flatrate }));
        self.responses.insert(
            tmdb_id,
            serde_json::json!({ "id": tmdb_id, "results": results }),
        );
        self
    }

    pub fn with_response(mut self, tmdb_id: i64, body: serde_json::Value) -> Self {
        self.responses.insert(tmdb_id, body);
        self
    }

    pub fn failing_movie(mut self, tmdb_id: i64) -> Self {
        self.failing_movies.insert(tmdb_id);
        self
    }

    pub fn with_reference(mut self, list: ReferenceList, results: Vec<serde_json::Value>) -> Self {
        self.references.insert(list, results);
        self
    }

    pub fn failing_reference(mut self, list: ReferenceList) -> Self {
        self.failing_references.insert(list);
        self
    }

    /// TMDB ids looked up so far, in call order.
    pub async fn lookups(&self) -> Vec<i64> {
        self.lookups.lock().await.clone()
    }

    /// Reference lists requested so far, in call order.
    pub async fn reference_lookups(&self) -> Vec<ReferenceList> {
        self.reference_lookups.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl TmdbApi for FakeTmdb {
    async fn watch_providers(
        &self,
        tmdb_id: i64,
        region: &str,
    ) -> Result<Vec<Provider>, ClientError> {
        self.lookups.lock().await.push(tmdb_id);
        if self.failing_movies.contains(&tmdb_id) {
            return Err(injected("watch providers"));
        }
        Ok(self
            .responses
            .get(&tmdb_id)
            .map(|body| parse_flatrate(body, region))
            .unwrap_or_default())
    }

    async fn reference_list(
        &self,
        list: ReferenceList,
    ) -> Result<Vec<serde_json::Value>, ClientError> {
        self.reference_lookups.lock().await.push(list);
        if self.failing_references.contains(&list) {
            return Err(injected(&list.to_string()));
        }
        Ok(self.references.get(&list).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct RadarrState {
    tags: Vec<Tag>,
    movies: Vec<Movie>,
    created: Vec<String>,
    updated: Vec<Movie>,
    calls: Vec<&'static str>,
}

/// Fake Radarr holding tags and movies in memory.
#[derive(Default)]
pub struct FakeRadarr {
    state: Mutex<RadarrState>,
    failing_labels: HashSet<String>,
    failing_updates: HashSet<i64>,
    fail_list_tags: bool,
    fail_list_movies: bool,
}

impl FakeRadarr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.state.get_mut().tags = tags;
        self
    }

    pub fn with_movies(mut self, movies: Vec<Movie>) -> Self {
        self.state.get_mut().movies = movies;
        self
    }

    pub fn failing_tag(mut self, label: &str) -> Self {
        self.failing_labels.insert(label.to_string());
        self
    }

    pub fn failing_update(mut self, movie_id: i64) -> Self {
        self.failing_updates.insert(movie_id);
        self
    }

    pub fn failing_list_tags(mut self) -> Self {
        self.fail_list_tags = true;
        self
    }

    pub fn failing_list_movies(mut self) -> Self {
        self.fail_list_movies = true;
        self
    }

    /// Labels passed to `create_tag`, including failed attempts.
    pub async fn created_labels(&self) -> Vec<String> {
        self.state.lock().await.created.clone()
    }

    /// Movies successfully passed to `update_movie`.
    pub async fn updated_movies(&self) -> Vec<Movie> {
        self.state.lock().await.updated.clone()
    }

    /// Names of the API operations called, in order.
    pub async fn calls(&self) -> Vec<&'static str> {
        self.state.lock().await.calls.clone()
    }

    pub async fn tags(&self) -> Vec<Tag> {
        self.state.lock().await.tags.clone()
    }
}

#[async_trait::async_trait]
impl RadarrApi for FakeRadarr {
    async fn create_tag(&self, label: &str) -> Result<Tag, ClientError> {
        let mut state = self.state.lock().await;
        state.calls.push("create_tag");
        state.created.push(label.to_string());
        if self.failing_labels.contains(label) {
            return Err(injected("create tag"));
        }

        if let Some(existing) = state.tags.iter().find(|t| t.label == label) {
            return Ok(existing.clone());
        }
        let id = state.tags.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let tag = Tag {
            id,
            label: label.to_string(),
        };
        state.tags.push(tag.clone());
        Ok(tag)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ClientError> {
        let mut state = self.state.lock().await;
        state.calls.push("list_tags");
        if self.fail_list_tags {
            return Err(injected("list tags"));
        }
        Ok(state.tags.clone())
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, ClientError> {
        let mut state = self.state.lock().await;
        state.calls.push("list_movies");
        if self.fail_list_movies {
            return Err(injected("list movies"));
        }
        Ok(state.movies.clone())
    }

    async fn update_movie(&self, movie: &Movie) -> Result<Movie, ClientError> {
        let mut state = self.state.lock().await;
        state.calls.push("update_movie");
        if self.failing_updates.contains(&movie.id) {
            return Err(injected("update movie"));
        }
        if let Some(stored) = state.movies.iter_mut().find(|m| m.id == movie.id) {
            *stored = movie.clone();
        }
        state.updated.push(movie.clone());
        Ok(movie.clone())
    }
}
