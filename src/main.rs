//! Inspection Sync Agent - runs background sync rounds for the local queue.
//!
//! Usage:
//!   inspection-sync-agent
//!
//! Environment variables (a `.env` file is read if present):
//!   INSPECTION_SYNC__SYNC__ENDPOINT_URL - Batch endpoint (required)
//!   INSPECTION_SYNC__AUTH__USER_ID - Inspector account id (required)
//!   INSPECTION_SYNC__AUTH__API_TOKEN - Bearer token (required)
//!   INSPECTION_SYNC__STORAGE__DATA_DIR - Queue directory (default: ./data)
//!   INSPECTION_SYNC__SYNC__POLL_INTERVAL_SECS - Seconds between rounds (default: 60)
//!   INSPECTION_SYNC__AGENT__LOG_FORMAT - pretty | json (default: pretty)

use std::sync::Arc;

use inspection_sync::adapters::{
    FileKeyValueStore, HttpBatchTransport, HttpConnectivityProbe, HttpTransportConfig,
    StaticIdentityProvider, StoredPendingQueue, SyncScheduler, SyncSchedulerConfig, SystemClock,
};
use inspection_sync::application::SyncCoordinator;
use inspection_sync::config::{AgentConfig, AppConfig, LogFormat};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&AgentConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&config.agent);

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let scheduler = match build_scheduler(&config) {
        Ok(scheduler) => Arc::new(scheduler),
        Err(e) => {
            error!("Failed to start agent: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        endpoint = %config.sync.endpoint_url,
        data_dir = %config.storage.data_dir.display(),
        environment = ?config.agent.environment,
        "Starting inspection sync agent"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let running = scheduler.clone();
    let scheduler_handle = tokio::spawn(async move { running.run(shutdown_rx).await });

    // Wait for shutdown signal
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Received shutdown signal");

    let _ = shutdown_tx.send(true);
    if let Err(e) = scheduler_handle.await {
        error!("Scheduler task error: {}", e);
    }

    info!("Agent stopped");
}

fn init_tracing(agent: &AgentConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&agent.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match agent.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn build_scheduler(config: &AppConfig) -> Result<SyncScheduler, Box<dyn std::error::Error>> {
    let store = Arc::new(FileKeyValueStore::new(&config.storage.data_dir));
    let queue = Arc::new(StoredPendingQueue::new(store));

    let transport = HttpBatchTransport::new(
        HttpTransportConfig::new(&config.sync.endpoint_url)
            .with_connect_timeout(config.sync.connect_timeout())
            .with_read_timeout(config.sync.read_timeout())
            .with_max_retries(config.sync.max_retries),
    )?;
    let probe = HttpConnectivityProbe::new(config.sync.connectivity_url(), config.sync.connect_timeout())?;

    let coordinator = SyncCoordinator::new(
        queue,
        Arc::new(transport),
        Arc::new(probe),
        Arc::new(StaticIdentityProvider::new(config.auth.identity())),
        Arc::new(SystemClock),
    );

    let scheduler_config = SyncSchedulerConfig::default().with_poll_interval(config.sync.poll_interval());
    Ok(SyncScheduler::with_config(Arc::new(coordinator), scheduler_config))
}
