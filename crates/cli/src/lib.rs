use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use elsewherr_core::{Config, CoreError, TmdbSettings};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Config path: `ELSEWHERR_CONFIG` env or `config.yaml` in the working dir.
pub fn config_path() -> PathBuf {
    std::env::var("ELSEWHERR_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
        .into()
}

/// Load the config, logging the cause before handing the error back.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    load_logged(path, Config::load)
}

/// Load only the TMDB settings; enough for the reference dump.
pub fn load_tmdb_settings(path: &Path) -> anyhow::Result<TmdbSettings> {
    load_logged(path, Config::load_tmdb)
}

fn load_logged<T>(
    path: &Path,
    load: impl FnOnce(&Path) -> Result<T, CoreError>,
) -> anyhow::Result<T> {
    info!(path = %path.display(), "loading config");
    load(path)
        .inspect_err(|e| {
            error!(
                path = %path.display(),
                code = e.code(),
                error = %e,
                "error loading config file"
            )
        })
        .with_context(|| format!("failed to load config from {}", path.display()))
}

/// The log destination of one entry point.
///
/// Events are routed to the file while the session is alive; dropping it
/// uninstalls the subscriber and closes the file.
pub struct LogSession {
    _guard: tracing::subscriber::DefaultGuard,
}

impl LogSession {
    /// Truncate `path` and route this thread's events to it.
    pub fn start(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let file = File::create(&path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .finish();

        Ok(Self {
            _guard: tracing::subscriber::set_default(subscriber),
        })
    }
}
