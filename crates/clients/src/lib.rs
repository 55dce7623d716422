pub mod fake;
pub mod radarr;
pub mod tmdb;

use thiserror::Error;

pub use radarr::{RadarrApi, RadarrClient};
pub use tmdb::{ReferenceList, TmdbApi, TmdbClient};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{service} returned {status}")]
    Status { service: &'static str, status: u16 },
    #[error("not found")]
    NotFound,
    #[error("decode error: {0}")]
    Decode(String),
}

/// Shared response handling for both APIs.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    service: &'static str,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }

    if !resp.status().is_success() {
        return Err(ClientError::Status {
            service,
            status: resp.status().as_u16(),
        });
    }

    resp.json()
        .await
        .map_err(|e| ClientError::Decode(format!("{service} JSON: {e}")))
}
