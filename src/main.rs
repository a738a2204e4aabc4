// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use crate::application::chart_builder::ChartBuilder;
use crate::application::chart_service::ChartService;
use crate::application::color_resolver::ChannelColorResolver;
use crate::infrastructure::config::load_settings;
use crate::infrastructure::http_source::HttpPayloadSource;
use crate::infrastructure::logging::init_tracing;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = load_settings()?;

    // Initialize tracing
    init_tracing(&settings.logging);

    // Palette is validated once and shared read-only by every chart build
    let palette = Arc::new(settings.charts.palette()?);
    let builder = ChartBuilder::new(
        ChannelColorResolver::new(palette),
        settings.charts.builder_options(),
    );

    // Data source (infrastructure layer)
    let source = Arc::new(HttpPayloadSource::new(&settings.source.endpoint));
    tracing::info!(url = %source.data_url(), "telemetry source configured");

    // Services (application layer)
    let chart_service = ChartService::new(source, builder, settings.charts.families.clone());

    let state = Arc::new(AppState { chart_service });

    // Router (presentation layer)
    let router = build_router(state);

    let addr: SocketAddr = settings.server.listen.parse()?;
    tracing::info!(%addr, "starting modem-telemetry-charts");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
