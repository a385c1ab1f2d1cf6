// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::insights_service::InsightsService;
use crate::infrastructure::config::{load_api_key, load_app_config};
use crate::infrastructure::csv_dataset::load_csv;
use crate::infrastructure::openai_client::OpenAiClient;
use crate::presentation::app_state::AppState;
use crate::presentation::router::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sales_insights=info,tower_http=info")),
        )
        .init();

    // Load configuration and credential; any failure here aborts startup
    let config = load_app_config()?;
    let api_key = load_api_key()?;

    // Dataset is read once and shared read-only
    let dataset = Arc::new(
        load_csv(Path::new(&config.data.path), &config.data)
            .with_context(|| format!("Failed to load dataset from {}", config.data.path))?,
    );

    // LLM client (infrastructure layer)
    let client = Arc::new(OpenAiClient::new(&config.llm, api_key)?);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(dataset.clone(), config.dashboard.top_n);
    let insights_service = InsightsService::new(dataset, client);

    let state = Arc::new(AppState {
        dashboard_service,
        insights_service,
    });

    // Build router (presentation layer)
    let router = create_router(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting sales-insights dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
