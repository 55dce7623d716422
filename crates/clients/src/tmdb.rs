//! TMDB (The Movie Database) watch-provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use elsewherr_core::types::Provider;
use tracing::debug;

use crate::{ClientError, read_json};

/// TMDB's static reference lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceList {
    Regions,
    MovieProviders,
}

impl ReferenceList {
    pub fn path(self) -> &'static str {
        match self {
            Self::Regions => "/watch/providers/regions",
            Self::MovieProviders => "/watch/providers/movie",
        }
    }
}

impl std::fmt::Display for ReferenceList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Regions => "regions",
            Self::MovieProviders => "movie providers",
        })
    }
}

/// Read-only access to TMDB streaming availability.
#[async_trait::async_trait]
pub trait TmdbApi: Send + Sync {
    /// Flat-rate providers streaming `tmdb_id` in `region`.
    ///
    /// A movie with no flat-rate offer in the region yields an empty list.
    async fn watch_providers(
        &self,
        tmdb_id: i64,
        region: &str,
    ) -> Result<Vec<Provider>, ClientError>;

    /// The `results` array of a reference list, empty when the key is absent.
    async fn reference_list(
        &self,
        list: ReferenceList,
    ) -> Result<Vec<serde_json::Value>, ClientError>;
}

pub struct TmdbClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ClientError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| ClientError::Network(e.without_url().to_string()))?;

        debug!(url = %url, status = %resp.status(), "TMDB response");
        read_json("TMDB", resp).await
    }
}

#[async_trait::async_trait]
impl TmdbApi for TmdbClient {
    async fn watch_providers(
        &self,
        tmdb_id: i64,
        region: &str,
    ) -> Result<Vec<Provider>, ClientError> {
        let data = self
            .get_json(&format!("/movie/{tmdb_id}/watch/providers"))
            .await?;
        Ok(parse_flatrate(&data, region))
    }

    async fn reference_list(
        &self,
        list: ReferenceList,
    ) -> Result<Vec<serde_json::Value>, ClientError> {
        let data = self.get_json(list.path()).await?;
        Ok(data["results"].as_array().cloned().unwrap_or_default())
    }
}

/// Providers under `results[region].flatrate`; absent keys mean none.
pub fn parse_flatrate(data: &serde_json::Value, region: &str) -> Vec<Provider> {
    data["results"][region]["flatrate"]
        .as_array()
        .map(|ps| {
            ps.iter()
                .filter_map(|p| p["provider_name"].as_str())
                .map(Provider::new)
                .collect()
        })
        .unwrap_or_default()
}
