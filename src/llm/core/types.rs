//! Core types for the LLM abstraction layer

use serde::{Deserialize, Serialize};

use super::config::GenerationConfig;

/// Request to generate content from an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Conversation messages (always a single user turn for this service)
    pub messages: Vec<Message>,
    /// Generation parameters
    pub config: GenerationConfig,
    /// System prompt/instructions
    pub system: Option<String>,
}

impl GenerateRequest {
    /// Build a single-turn request: one user message under a system prompt
    pub fn single_turn(
        system: impl Into<String>,
        prompt: impl Into<String>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            config,
            system: Some(system.into()),
        }
    }
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Text content of the message
    pub content: String,
}

impl Message {
    /// Create a new user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Human input; the only role this service sends
    User,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
        }
    }
}

/// Completed (non-streaming) generation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Provider-assigned message ID
    pub id: String,
    /// Text segments in the order the provider returned them
    pub text_segments: Vec<String>,
    /// Why generation stopped, if reported
    pub finish_reason: Option<FinishReason>,
    /// Token accounting, if reported
    pub usage: Option<UsageMetadata>,
}

impl GenerateResponse {
    /// The first text segment, which is what callers surface as the answer
    pub fn first_text(&self) -> Option<&str> {
        self.text_segments.first().map(String::as_str)
    }
}

/// Reason why generation finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural completion
    EndTurn,
    /// Hit token limit
    MaxTokens,
    /// Hit stop sequence
    StopSequence,
    /// Provider-specific reason
    Other(String),
}

impl From<&str> for FinishReason {
    fn from(reason: &str) -> Self {
        match reason {
            "end_turn" => FinishReason::EndTurn,
            "max_tokens" => FinishReason::MaxTokens,
            "stop_sequence" => FinishReason::StopSequence,
            other => FinishReason::Other(other.to_string()),
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Prompt tokens consumed
    pub input_tokens: u32,
    /// Response tokens generated
    pub output_tokens: u32,
    /// Sum of input and output
    pub total_tokens: u32,
}

impl UsageMetadata {
    /// Create new usage metadata
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens.saturating_add(output_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_user_constructor() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_single_turn_request() {
        let request =
            GenerateRequest::single_turn("be brief", "hello", GenerationConfig::new("m", 10));
        assert_eq!(request.system.as_deref(), Some("be brief"));
        assert_eq!(request.messages, vec![Message::user("hello")]);
    }

    #[test]
    fn test_first_text() {
        let response = GenerateResponse {
            id: "msg_1".to_string(),
            text_segments: vec!["first".to_string(), "second".to_string()],
            finish_reason: Some(FinishReason::EndTurn),
            usage: None,
        };
        assert_eq!(response.first_text(), Some("first"));

        let empty = GenerateResponse {
            text_segments: vec![],
            ..response
        };
        assert_eq!(empty.first_text(), None);
    }

    #[test]
    fn test_finish_reason_from_str() {
        assert_eq!(FinishReason::from("end_turn"), FinishReason::EndTurn);
        assert_eq!(FinishReason::from("max_tokens"), FinishReason::MaxTokens);
        assert_eq!(
            FinishReason::from("refusal"),
            FinishReason::Other("refusal".to_string())
        );
    }

    #[test]
    fn test_usage_metadata_total() {
        let usage = UsageMetadata::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn test_usage_metadata_total_saturates() {
        let usage = UsageMetadata::new(u32::MAX, 1);
        assert_eq!(usage.input_tokens, u32::MAX);
        assert_eq!(usage.total_tokens, u32::MAX);
    }
}
