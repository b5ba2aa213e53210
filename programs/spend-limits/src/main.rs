//! spend-limits-server: serves the current spend allowance of Quartz vaults.
//!
//! Usage: `spend-limits-server [config.toml]`

use std::{path::Path, sync::Arc};

use spend_limits::{
    server::{router, AppState},
    ReaderConfig, RpcLedgerSource, SpendLimitReader,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spend_limits=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting spend-limits-server v{}", env!("CARGO_PKG_VERSION"));

    let mut config = if let Some(config_path) = std::env::args().nth(1) {
        info!("Loading configuration from {}", config_path);
        ReaderConfig::from_file(Path::new(&config_path))?
    } else {
        info!("No config file specified, using development defaults");
        ReaderConfig::development()
    };
    config.apply_env_overrides()?;
    config.validate()?;

    let program_id = config.program_id()?;
    let source = RpcLedgerSource::new(&config.rpc)?;
    let reader = SpendLimitReader::new(Arc::new(source), program_id, config.tick_unit);
    info!(
        rpc = %config.rpc.url,
        %program_id,
        tick_unit = %reader.tick_unit(),
        "Reading vault spend limits"
    );

    let app = router(Arc::new(AppState { reader }));

    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr).await?;
    info!("Listening on {}", config.server.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
