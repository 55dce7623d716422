use std::path::Path;

use elsewherr_clients::TmdbClient;
use elsewherr_cli::{LogSession, config_path, load_tmdb_settings};
use tracing::error;

const LOG_FILE: &str = "providers-load.log";
const REPORT_FILE: &str = "providers.txt";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _log = LogSession::start(LOG_FILE)?;

    if let Err(e) = run().await {
        error!(error = %format!("{e:#}"), "reference dump aborted");
        return Err(e);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let settings = load_tmdb_settings(&config_path())?;
    let tmdb = TmdbClient::new(settings.tmdb_url, settings.tmdb_api_key);

    elsewherr_sync::reference::run_reference_dump(&tmdb, Path::new(REPORT_FILE)).await?;
    Ok(())
}
