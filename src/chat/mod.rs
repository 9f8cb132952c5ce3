//! Chat gateway: turns a user message or quick action into one provider call

pub mod prompts;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::llm::{
    ClaudeModel, FinishReason, GenerateRequest, GenerationConfig, LlmError, LlmProvider,
};
use crate::models::{iso_timestamp, ChatResponse, QuickActionResponse};

pub use prompts::{build_quick_action_prompt, QuickAction, SYSTEM_PROMPT};

/// Output length cap for every completion
pub const MAX_TOKENS: u32 = 1000;

/// Sampling temperature for every completion
pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] LlmError),
}

/// Forwards prompts to the completion provider under the analyst persona
#[derive(Clone)]
pub struct ChatGateway {
    provider: Arc<dyn LlmProvider>,
    config: GenerationConfig,
}

impl ChatGateway {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            config: GenerationConfig::new(ClaudeModel::Sonnet35.as_str(), MAX_TOKENS)
                .with_temperature(TEMPERATURE),
        }
    }

    /// Send a free-form message. An absent or empty message is rejected
    /// before any provider call is made.
    pub async fn send_message(&self, message: Option<&str>) -> Result<ChatResponse, ChatError> {
        let message = message
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ChatError::Validation("Message is required".to_string()))?;

        let response = self.complete(message.to_string()).await?;

        Ok(ChatResponse {
            response,
            timestamp: iso_timestamp(),
        })
    }

    /// Run a named quick action, optionally with campaign context
    pub async fn run_quick_action(
        &self,
        action: &str,
        context: Option<&Value>,
    ) -> Result<QuickActionResponse, ChatError> {
        let prompt = build_quick_action_prompt(action, context);
        let response = self.complete(prompt).await?;

        Ok(QuickActionResponse {
            response,
            action: action.to_string(),
            timestamp: iso_timestamp(),
        })
    }

    async fn complete(&self, prompt: String) -> Result<String, LlmError> {
        let request = GenerateRequest::single_turn(SYSTEM_PROMPT, prompt, self.config.clone());
        let generated = self.provider.generate(request).await?;

        tracing::debug!(
            id = %generated.id,
            finish_reason = ?generated.finish_reason,
            usage = ?generated.usage,
            "completion received"
        );
        if generated.finish_reason == Some(FinishReason::MaxTokens) {
            tracing::warn!(id = %generated.id, max_tokens = MAX_TOKENS, "completion truncated");
        }

        generated
            .first_text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{GenerateResponse, MessageRole, UsageMetadata};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingProvider {
        reply: Option<Vec<String>>,
        finish_reason: Option<FinishReason>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl RecordingProvider {
        fn replying(segments: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(segments.iter().map(|s| s.to_string()).collect()),
                finish_reason: None,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn truncated(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(vec![text.to_string()]),
                finish_reason: Some(FinishReason::MaxTokens),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                finish_reason: None,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<GenerateRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Some(segments) => Ok(GenerateResponse {
                    id: "msg_test".to_string(),
                    text_segments: segments.clone(),
                    finish_reason: self.finish_reason.clone(),
                    usage: Some(UsageMetadata::new(10, 20)),
                }),
                None => Err(LlmError::ProviderError {
                    code: "overloaded_error".to_string(),
                    message: "Overloaded".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_send_message_builds_fixed_request() {
        let provider = RecordingProvider::replying(&["Raise bids on top keywords.", "ignored"]);
        let gateway = ChatGateway::new(provider.clone());

        let reply = gateway.send_message(Some("How do I lower CPA?")).await.unwrap();
        assert_eq!(reply.response, "Raise bids on top keywords.");
        assert!(!reply.timestamp.is_empty());

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.system.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(request.config.model, "claude-3-5-sonnet-20241022");
        assert_eq!(request.config.max_tokens, 1000);
        assert_eq!(request.config.temperature, Some(0.7));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.messages[0].content, "How do I lower CPA?");
    }

    #[tokio::test]
    async fn test_send_message_rejects_missing_or_empty() {
        let provider = RecordingProvider::replying(&["unused"]);
        let gateway = ChatGateway::new(provider.clone());

        for message in [None, Some("")] {
            let err = gateway.send_message(message).await.unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)));
            assert_eq!(err.to_string(), "Message is required");
        }
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_passes_message_through() {
        let gateway = ChatGateway::new(RecordingProvider::failing());

        let err = gateway.send_message(Some("hi")).await.unwrap_err();
        assert!(matches!(err, ChatError::Upstream(_)));
        assert_eq!(err.to_string(), "Provider error (overloaded_error): Overloaded");
    }

    #[tokio::test]
    async fn test_empty_provider_reply_is_an_error() {
        let gateway = ChatGateway::new(RecordingProvider::replying(&[]));

        let err = gateway.send_message(Some("hi")).await.unwrap_err();
        assert!(matches!(err, ChatError::Upstream(LlmError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_truncated_reply_is_still_returned() {
        let gateway = ChatGateway::new(RecordingProvider::truncated("Cut budget on"));

        let reply = gateway.send_message(Some("hi")).await.unwrap();
        assert_eq!(reply.response, "Cut budget on");
    }

    #[tokio::test]
    async fn test_quick_action_expands_template_and_echoes_action() {
        let provider = RecordingProvider::replying(&["Move budget to search."]);
        let gateway = ChatGateway::new(provider.clone());
        let context = json!({"daily_budget": 500});

        let reply = gateway
            .run_quick_action("optimize_budget", Some(&context))
            .await
            .unwrap();
        assert_eq!(reply.response, "Move budget to search.");
        assert_eq!(reply.action, "optimize_budget");

        let prompt = &provider.requests()[0].messages[0].content;
        assert!(prompt.starts_with(QuickAction::OptimizeBudget.template()));
        assert!(prompt.ends_with("Context: {\"daily_budget\":500}"));
    }

    #[tokio::test]
    async fn test_quick_action_unknown_name_is_literal_prompt() {
        let provider = RecordingProvider::replying(&["ok"]);
        let gateway = ChatGateway::new(provider.clone());

        gateway
            .run_quick_action("summarize last week", None)
            .await
            .unwrap();
        assert_eq!(provider.requests()[0].messages[0].content, "summarize last week");
    }
}
