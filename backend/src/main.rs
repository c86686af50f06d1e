//! Weather Sync Platform - Backend Server
//!
//! Ingests weather observations for a configured set of locations, keeps
//! the store current through keyed upserts, and serves a minimal read API.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_sync_backend::external::ConditionsClient;
use weather_sync_backend::{config::Config, create_app, services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_sync_backend=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    config.validate()?;

    tracing::info!("Starting Weather Sync Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    tracing::info!("Running database migrations...");
    weather_sync_backend::db::MIGRATOR.run(&db_pool).await?;
    tracing::info!("Migrations completed");

    let client = ConditionsClient::new(
        config.provider.api_key.clone(),
        config.provider.endpoint.clone(),
        config.provider.timeout_secs,
    )?;

    // Create application state
    let state = AppState {
        db: db_pool.clone(),
        config: Arc::new(config.clone()),
    };

    // Recurring sync pipeline. Runs are sequential; a failed run is logged
    // and the next tick tries again.
    let sync_config = config.clone();
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(sync_config.sync.interval_secs));
        loop {
            ticker.tick().await;
            if let Err(e) = services::run_pipeline(&db_pool, &sync_config, &client).await {
                tracing::error!("Sync pipeline run failed: {e}");
            }
        }
    });

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
