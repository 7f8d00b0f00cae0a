//! Fuel Pro web frontend

use anyhow::Context;
use std::net::SocketAddr;

use fuel_agency_server::{
    config::AppConfig,
    frontend::{client::ApiClient, create_router, FrontendState},
    logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let _log_guard = logging::init(&config.logging, "fuel_agency_frontend");

    tracing::info!("Starting Fuel Pro frontend v{}", env!("CARGO_PKG_VERSION"));

    let client = ApiClient::new(&config.frontend.backend_url)?;
    tracing::info!("Using REST API at {}", config.frontend.backend_url);

    let state = FrontendState {
        client,
        booking_interval_days: config.billing.booking_interval_days,
    };

    let addr = SocketAddr::new(
        config.frontend.host.parse().context("Invalid host address")?,
        config.frontend.port,
    );

    let app = create_router(state);

    tracing::info!("Frontend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
