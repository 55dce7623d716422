//! Configuration loading.
//!
//! The config file is a YAML document with camelCase keys. It is parsed into
//! an all-optional raw form first so that every missing key can be reported
//! in one error instead of failing on first access.

use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::CoreError;

pub const DEFAULT_TMDB_URL: &str = "https://api.themoviedb.org/3";

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub radarr_url: String,
    pub radarr_api_key: String,
    pub tmdb_api_key: String,
    pub tag_prefix: String,
    pub required_providers: Vec<String>,
    pub provider_region: String,
    /// Write updated tag sets back to Radarr. Off means dry run.
    pub apply_changes: bool,
    pub tmdb_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    radarr_url: Option<String>,
    radarr_api_key: Option<String>,
    tmdb_api_key: Option<String>,
    tag_prefix: Option<String>,
    required_providers: Option<Vec<String>>,
    provider_region: Option<String>,
    apply_changes: Option<bool>,
    tmdb_url: Option<String>,
}

/// The subset of the config the TMDB reference dump needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbSettings {
    pub tmdb_api_key: String,
    pub tmdb_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTmdbSettings {
    tmdb_api_key: Option<String>,
    tmdb_url: Option<String>,
}

impl Config {
    /// Read and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        Self::from_yaml(&read_file(path)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CoreError> {
        parse_raw::<RawConfig>(yaml)?.validate()
    }

    /// Read only the TMDB keys from the config file at `path`; the Radarr and
    /// tagging keys may be absent.
    pub fn load_tmdb(path: &Path) -> Result<TmdbSettings, CoreError> {
        TmdbSettings::from_yaml(&read_file(path)?)
    }
}

impl TmdbSettings {
    pub fn from_yaml(yaml: &str) -> Result<Self, CoreError> {
        let raw = parse_raw::<RawTmdbSettings>(yaml)?;
        let Some(tmdb_api_key) = raw.tmdb_api_key else {
            return Err(CoreError::MissingKeys(vec!["tmdbApiKey"]));
        };
        Ok(Self {
            tmdb_api_key,
            tmdb_url: tmdb_url(raw.tmdb_url.as_deref()),
        })
    }
}

fn read_file(path: &Path) -> Result<String, CoreError> {
    std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_raw<T: DeserializeOwned + Default>(yaml: &str) -> Result<T, CoreError> {
    // An empty document deserializes to unit, not a map.
    if yaml.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

fn tmdb_url(configured: Option<&str>) -> String {
    configured
        .unwrap_or(DEFAULT_TMDB_URL)
        .trim_end_matches('/')
        .to_string()
}

impl RawConfig {
    fn validate(self) -> Result<Config, CoreError> {
        let mut missing = Vec::new();

        macro_rules! require {
            ($field:ident, $key:literal) => {
                match self.$field {
                    Some(v) => Some(v),
                    None => {
                        missing.push($key);
                        None
                    }
                }
            };
        }

        let radarr_url = require!(radarr_url, "radarrUrl");
        let radarr_api_key = require!(radarr_api_key, "radarrApiKey");
        let tmdb_api_key = require!(tmdb_api_key, "tmdbApiKey");
        let tag_prefix = require!(tag_prefix, "tagPrefix");
        let required_providers = require!(required_providers, "requiredProviders");
        let provider_region = require!(provider_region, "providerRegion");

        let (
            Some(radarr_url),
            Some(radarr_api_key),
            Some(tmdb_api_key),
            Some(tag_prefix),
            Some(required_providers),
            Some(provider_region),
        ) = (
            radarr_url,
            radarr_api_key,
            tmdb_api_key,
            tag_prefix,
            required_providers,
            provider_region,
        )
        else {
            return Err(CoreError::MissingKeys(missing));
        };

        if tag_prefix.is_empty() {
            return Err(CoreError::Invalid {
                key: "tagPrefix",
                reason: "must not be empty".into(),
            });
        }

        Ok(Config {
            radarr_url: radarr_url.trim_end_matches('/').to_string(),
            radarr_api_key,
            tmdb_api_key,
            tag_prefix,
            required_providers,
            provider_region,
            apply_changes: self.apply_changes.unwrap_or(false),
            tmdb_url: tmdb_url(self.tmdb_url.as_deref()),
        })
    }
}
