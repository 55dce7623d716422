use elsewherr_clients::{RadarrClient, TmdbClient};
use elsewherr_cli::{LogSession, config_path, load_config};
use tracing::{error, info};

const LOG_FILE: &str = "elsewherr.log";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _log = LogSession::start(LOG_FILE)?;

    if let Err(e) = run().await {
        error!(error = %format!("{e:#}"), "run aborted");
        return Err(e);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = load_config(&config_path())?;
    info!(
        radarr = %config.radarr_url,
        region = %config.provider_region,
        prefix = %config.tag_prefix,
        apply = config.apply_changes,
        "config loaded"
    );

    let tmdb = TmdbClient::new(config.tmdb_url.clone(), config.tmdb_api_key.clone());
    let radarr = RadarrClient::new(config.radarr_url.clone(), config.radarr_api_key.clone());

    elsewherr_sync::run(&config, &tmdb, &radarr).await?;
    Ok(())
}
