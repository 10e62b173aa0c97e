//! Pool initialization indexer server
//!
//! Receives signed `PoolInitialized` events, decodes the packed pool config,
//! and stores one record per event under its order-preserving id.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::file::{StoreBackend, StoreConfig};
use config::{ConfigLoader, get_database_url};
use poolidx_core::config::SharedConfig;
use poolidx_core::events::pool_initialized_channel;
use poolidx_core::processors::{IndexerRunner, PoolInitializationIndexer};
use poolidx_core::store::{
    MemoryPoolInitializationStore, PgPoolInitializationStore, PoolInitializationStore,
};
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Pool initialization indexer
#[derive(Parser, Debug)]
#[command(name = "poolidx-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./poolidx-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Run database migrations on startup
    #[arg(long, default_value = "false")]
    migrate: bool,

    /// Emit logs as JSON lines
    #[arg(long, default_value = "false")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.log_json);

    tracing::info!("Starting poolidx-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = Arc::new(ConfigLoader::new(&args.config, args.listen));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = loaded_config.server.listen;
    tracing::info!("Configuration loaded from {:?}", args.config);

    let (store, db_pool) = open_store(&loaded_config.store, args.migrate).await?;
    let shared_config = SharedConfig::new(loaded_config.server, loaded_config.ingest);

    // Single indexer runner fed by the ingestion endpoint
    let (event_tx, event_rx) = pool_initialized_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let indexer = PoolInitializationIndexer::new(store.clone(), shared_config.ingest.clone());
    let runner = tokio::spawn(IndexerRunner::new(indexer, event_rx, shutdown_rx).run());

    let state = AppState::new(store, shared_config, event_tx);

    // Spawn config reload handler (listens for SIGHUP)
    let reload_notify = spawn_config_reload_handler(state.clone(), config_loader);

    let router = build_router(state);

    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    reload_notify.notify_one();

    // Let the runner index whatever is still queued
    if shutdown_tx.send(true).is_err() {
        tracing::debug!("IndexerRunner already stopped");
    }
    if let Err(e) = runner.await {
        tracing::error!("IndexerRunner task failed: {}", e);
    }

    if let Some(db_pool) = db_pool {
        tracing::info!("Closing database connections...");
        db_pool.close().await;
    }
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Build the configured store backend. The pool is returned so it can be
/// closed on shutdown.
async fn open_store(
    config: &StoreConfig,
    migrate: bool,
) -> anyhow::Result<(Arc<dyn PoolInitializationStore>, Option<PgPool>)> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, records will not survive a restart");
            if migrate {
                tracing::warn!("--migrate has no effect with the memory backend");
            }
            let store: Arc<dyn PoolInitializationStore> =
                Arc::new(MemoryPoolInitializationStore::new());
            Ok((store, None))
        }
        StoreBackend::Postgres => {
            let database_url = get_database_url().map_err(|e| {
                tracing::error!("DATABASE_URL environment variable not set");
                e
            })?;

            tracing::info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&database_url)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to database: {}", e);
                    e
                })?;
            tracing::info!("Database connection established");

            if migrate {
                tracing::info!("Running database migrations...");
                sqlx::migrate!("../migrations")
                    .run(&db_pool)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to run migrations: {}", e);
                        e
                    })?;
                tracing::info!("Migrations completed successfully");
            }

            let store: Arc<dyn PoolInitializationStore> =
                Arc::new(PgPoolInitializationStore::new(db_pool.clone()));
            Ok((store, Some(db_pool)))
        }
    }
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
