//! Hirelink Server — application entry point.

use hirelink_db::DbManager;
use hirelink_notify::SmsDispatcher;
use hirelink_server::{AppState, ServerConfig, build_router};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;

    let manager = DbManager::connect(&config.db).await?;
    hirelink_db::run_migrations(manager.client()).await?;

    if config.gateway.is_none() {
        info!("sms gateway credentials absent; notifications will be dropped");
    }
    let dispatcher = SmsDispatcher::new(config.gateway.clone(), config.sms_timeout)?;

    let state = AppState::new(manager.client().clone(), config.auth.clone(), dispatcher);
    let router = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Hirelink server listening");

    axum::serve(listener, router).await?;
    Ok(())
}
