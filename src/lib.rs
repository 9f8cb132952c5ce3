// HTTP server modules
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

// Chat gateway and user registry
pub mod chat;
pub mod registry;

// LLM abstraction layer
pub mod llm;

use std::sync::Arc;

use chat::ChatGateway;
use registry::UserRegistry;

/// Services shared by every request, constructed once at startup
#[derive(Clone)]
pub struct AppState {
    pub gateway: ChatGateway,
    pub registry: Arc<UserRegistry>,
}

impl AppState {
    pub fn new(gateway: ChatGateway, registry: Arc<UserRegistry>) -> Self {
        Self { gateway, registry }
    }
}
