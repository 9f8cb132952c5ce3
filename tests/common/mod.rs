use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use campaign_assistant::chat::ChatGateway;
use campaign_assistant::llm::{GenerateRequest, GenerateResponse, LlmError, LlmProvider};
use campaign_assistant::registry::UserRegistry;
use campaign_assistant::routes::configure_routes;
use campaign_assistant::AppState;
use warp::Filter;

/// Provider double that records every request and answers from a script
pub struct MockProvider {
    reply: Result<String, String>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Text of the single user message of the last request
    pub fn last_prompt(&self) -> String {
        let requests = self.requests();
        let last = requests.last().expect("no provider call recorded");
        last.messages[0].content.clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(text) => Ok(GenerateResponse {
                id: "msg_mock".to_string(),
                text_segments: vec![text.clone()],
                finish_reason: None,
                usage: None,
            }),
            Err(message) => Err(LlmError::ProviderError {
                code: "api_error".to_string(),
                message: message.clone(),
            }),
        }
    }
}

/// Full filter tree backed by a mock provider and a fresh registry
pub fn test_app(
    provider: Arc<MockProvider>,
) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
    let state = AppState::new(ChatGateway::new(provider), Arc::new(UserRegistry::new()));
    configure_routes(state, PathBuf::from("tests/fixtures/static"))
}
