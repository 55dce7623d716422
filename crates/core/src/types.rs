use serde::{Deserialize, Serialize};

/// A Radarr tag. `id` is 0 until Radarr has assigned one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: i64,
    pub label: String,
}

impl Tag {
    pub fn new_unsaved(label: impl Into<String>) -> Self {
        Self {
            id: 0,
            label: label.into(),
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

/// A movie record as returned by Radarr.
///
/// Only the fields this tool reads are typed; everything else Radarr sends is
/// kept in `extra` so the record can be written back without losing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub tmdb_id: i64,
    #[serde(default)]
    pub tags: Vec<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Movie {
    pub fn new(id: i64, title: impl Into<String>, tmdb_id: i64, tags: Vec<i64>) -> Self {
        Self {
            id,
            title: title.into(),
            tmdb_id,
            tags,
            extra: serde_json::Map::new(),
        }
    }
}

/// A flat-rate streaming provider offering a movie in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_name: String,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            provider_name: name.into(),
        }
    }
}

/// A TMDB watch-provider region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub iso_3166_1: String,
    pub english_name: String,
}
