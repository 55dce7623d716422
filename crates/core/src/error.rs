use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or working with domain data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("missing required config keys: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),

    #[error("invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl CoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::ConfigParse(_) => "config_parse",
            Self::MissingKeys(_) => "missing_keys",
            Self::Invalid { .. } => "invalid_value",
        }
    }
}
