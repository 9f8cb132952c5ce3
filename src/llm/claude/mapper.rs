//! Mapping between abstraction types and Claude-specific types

use crate::llm::core::types::{
    FinishReason, GenerateRequest, GenerateResponse, Message, UsageMetadata,
};

use super::types::{ClaudeMessage, ClaudeResponseBlock, MessagesRequest, MessagesResponse};

/// Convert our abstraction request to Claude's request format
pub fn to_claude_request(request: GenerateRequest) -> MessagesRequest {
    MessagesRequest {
        model: request.config.model,
        max_tokens: request.config.max_tokens,
        messages: request
            .messages
            .into_iter()
            .map(to_claude_message)
            .collect(),
        system: request.system,
        temperature: request.config.temperature,
    }
}

fn to_claude_message(message: Message) -> ClaudeMessage {
    ClaudeMessage {
        role: message.role.as_str().to_string(),
        content: message.content,
    }
}

/// Convert Claude's response to our abstraction's response, keeping only text blocks
pub fn from_claude_response(response: MessagesResponse) -> GenerateResponse {
    let text_segments = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ClaudeResponseBlock::Text { text } => Some(text),
            ClaudeResponseBlock::Unsupported => None,
        })
        .collect();

    GenerateResponse {
        id: response.id,
        text_segments,
        finish_reason: response.stop_reason.as_deref().map(FinishReason::from),
        usage: response
            .usage
            .map(|u| UsageMetadata::new(u.input_tokens, u.output_tokens)),
    }
}
