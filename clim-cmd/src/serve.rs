//! `serve` subcommand

use anyhow::Context;
use clim_api::{ClimateServer, ServerConfig};
use clim_db::Database;
use log::info;
use std::path::Path;
use std::time::Duration;

/// Open the data file and serve the API until Ctrl+C.
///
/// A missing or incompatible data file fails here, before the listener is bound.
pub async fn run_serve(
    database: &Path,
    host: &str,
    port: u16,
    request_timeout_secs: u64,
) -> anyhow::Result<()> {
    let config = ServerConfig::new(host, port, Duration::from_secs(request_timeout_secs))?;
    let db = Database::open_read_only(database)
        .with_context(|| format!("Failed to open data file {}", database.display()))?;

    info!(
        "Serving {} on http://{} (request timeout {:?})",
        database.display(),
        config.bind_addr,
        config.request_timeout
    );
    ClimateServer::new(config, db).run().await?;
    Ok(())
}
