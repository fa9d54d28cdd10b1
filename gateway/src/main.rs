use std::sync::Arc;

use anyhow::{Context, Result};
use sen_core::clock::SystemClock;
use sen_core::commands::Acknowledger;
use sen_core::config::GatewayConfig;
use sen_core::store::{RestStore, Store};
use sen_gateway::{app, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging Setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    info!("Sen Gateway Initializing...");

    // 2. Configuration
    let config = GatewayConfig::from_env().context("Failed to load gateway configuration")?;

    // 3. Store client (optional: store-backed routes answer 503 without it)
    let store: Option<Arc<dyn Store>> = match &config.store {
        Some(store_config) => {
            let client = RestStore::new(store_config).context("Failed to build store client")?;
            Some(Arc::new(client))
        }
        None => {
            warn!("Store credentials missing; /create-agent, /log-lead and /register will answer 503");
            None
        }
    };

    // 4. Bundle State
    let state = AppState {
        store,
        clock: Arc::new(SystemClock),
        commands: Arc::new(Acknowledger),
        identity_path: config.identity_path.clone(),
        tables: config.tables.clone(),
    };

    // 5. Start Server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Gateway listening on {}...", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
