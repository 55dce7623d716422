//! Radarr v3 API client (tags and movies only).

use elsewherr_core::types::{Movie, Tag};
use tracing::debug;

use crate::{ClientError, read_json};

/// The subset of Radarr this tool talks to.
#[async_trait::async_trait]
pub trait RadarrApi: Send + Sync {
    /// Create a tag. Radarr assigns the id and ignores duplicate labels.
    async fn create_tag(&self, label: &str) -> Result<Tag, ClientError>;

    async fn list_tags(&self) -> Result<Vec<Tag>, ClientError>;

    async fn list_movies(&self) -> Result<Vec<Movie>, ClientError>;

    /// Persist a movie record, including its tag set.
    async fn update_movie(&self, movie: &Movie) -> Result<Movie, ClientError>;
}

pub struct RadarrClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RadarrClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/api/v3{path}", self.base_url);
        debug!(method = %method, url = %url, "Radarr request");
        self.client
            .request(method, url)
            .header("X-Api-Key", &self.api_key)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        debug!(status = %resp.status(), "Radarr response");
        read_json("Radarr", resp).await
    }
}

#[async_trait::async_trait]
impl RadarrApi for RadarrClient {
    async fn create_tag(&self, label: &str) -> Result<Tag, ClientError> {
        let body = Tag::new_unsaved(label);
        self.send(self.request(reqwest::Method::POST, "/tag").json(&body))
            .await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ClientError> {
        self.send(self.request(reqwest::Method::GET, "/tag")).await
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, ClientError> {
        self.send(self.request(reqwest::Method::GET, "/movie")).await
    }

    async fn update_movie(&self, movie: &Movie) -> Result<Movie, ClientError> {
        self.send(self.request(reqwest::Method::PUT, "/movie").json(movie))
            .await
    }
}
