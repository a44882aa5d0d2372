use financial_insights_api::{
    advisor::{GrokClient, NebiusClient},
    config::AppConfig,
    routes::{start_server, AppState},
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();

    if config.nebius_api_key.is_none() {
        warn!("NEBIUS_API_KEY not set; /chat will return a provider error");
    }
    if config.grok_api_key.is_none() {
        warn!("GROK_API_KEY not set; /agent will return a provider error");
    }

    info!("Financial Insights API - starting");
    info!("Port: {}", config.port);

    let state = AppState {
        chat_advisor: Arc::new(NebiusClient::new(config.nebius_api_key.clone())),
        agent_advisor: Arc::new(GrokClient::new(config.grok_api_key.clone())),
        config: Arc::new(config),
    };

    start_server(state).await?;

    Ok(())
}
