use anyhow::Context;
use api_server::{route_summary, router, AppState};
use application::ProfileApp;
use config::{Config, StoreKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    let config = Config::from_env(None)?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).context("invalid RUST_LOG filter")?,
        )
        .init();

    info!("🚀 Starting User Profile API Server");
    config.print_config();

    let profile_app = match config.store {
        StoreKind::Sqlite => ProfileApp::new(&config.database_path)
            .with_context(|| format!("failed to open database {}", config.database_path))?,
        StoreKind::Memory => ProfileApp::in_memory(),
    };
    let app = router(AppState::new(profile_app));

    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    info!("🌐 API Server listening on http://{}", listener.local_addr()?);
    info!("📖 API Documentation:");
    for line in route_summary() {
        info!("   {}", line);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Shutting down user profile service");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
