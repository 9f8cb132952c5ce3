//! LLM Abstraction Layer
//!
//! This module provides a provider-neutral interface for single-turn text
//! generation, with an Anthropic Claude implementation.

pub mod claude;
pub mod core;

// Re-export commonly used types
pub use claude::{ClaudeClient, ClaudeModel};
pub use self::core::{
    config::GenerationConfig,
    error::LlmError,
    provider::LlmProvider,
    types::{
        FinishReason, GenerateRequest, GenerateResponse, Message, MessageRole, UsageMetadata,
    },
};
