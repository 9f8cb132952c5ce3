use std::sync::Arc;

use campaign_assistant::chat::ChatGateway;
use campaign_assistant::config::AppConfig;
use campaign_assistant::llm::ClaudeClient;
use campaign_assistant::registry::UserRegistry;
use campaign_assistant::routes::configure_routes;
use campaign_assistant::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,campaign_assistant=debug".into()),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    if config.api_key.is_none() {
        tracing::warn!("CLAUDE_API_KEY is not set; AI endpoints will return errors");
    }

    let provider = ClaudeClient::new(config.api_key.clone(), config.anthropic_base_url.clone())
        .expect("Failed to create Claude client");

    let state = AppState::new(
        ChatGateway::new(Arc::new(provider)),
        Arc::new(UserRegistry::new()),
    );
    let routes = configure_routes(state, config.static_dir.clone());

    let addr = config.socket_addr();
    tracing::info!("Starting server on http://{}", addr);
    warp::serve(routes).run(addr).await;
}
