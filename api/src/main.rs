use anyhow::Result;
use shared::{Config, HistoricalService};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting historical price API...");

    let config = Config::from_env()?;
    let service = HistoricalService::from_config(&config)?;
    info!("Fetching candles from {}", config.candles_endpoint());

    let app = routes::router(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("API server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
