//! Synchronization services for the Weather Sync Platform

pub mod locations;
pub mod observations;

pub use locations::LocationSyncService;
pub use observations::ObservationSyncService;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::error::AppResult;
use crate::external::ConditionsClient;

/// One full pipeline run: refresh the location directory from the configured
/// file, then fetch and store observations for every flagged location.
pub async fn run_pipeline(db: &SqlitePool, config: &Config, client: &ConditionsClient) -> AppResult<()> {
    let records = locations::load_locations_file(&config.sync.locations_file)?;
    let synced = LocationSyncService::new(db.clone()).sync_all(&records).await?;
    tracing::info!("Synchronized {synced} location records");

    let report = ObservationSyncService::new(db.clone(), client.clone())
        .run_once()
        .await?;
    tracing::info!(
        "Observation run complete: {} stored, {} skipped",
        report.stored,
        report.skipped
    );

    Ok(())
}
