// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use fleet_telemetry::application::metric_detail_service::MetricDetailService;
use fleet_telemetry::domain::metric::MetricCatalog;
use fleet_telemetry::infrastructure::config::{load_catalog_config, load_server_config};
use fleet_telemetry::infrastructure::random_noise::noise_from_settings;
use fleet_telemetry::presentation::app_state::AppState;
use fleet_telemetry::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let server_config = load_server_config()?;
    let catalog_config = load_catalog_config()?;

    // Jitter source (infrastructure layer)
    let noise = noise_from_settings(&server_config.noise);

    // Create services (application layer)
    let metric_detail_service =
        MetricDetailService::new(MetricCatalog::default(), catalog_config.hospitals, noise);

    // Create application state
    let state = Arc::new(AppState {
        metric_detail_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = server_config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", server_config.server.bind))?;
    tracing::info!("Starting fleet-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
