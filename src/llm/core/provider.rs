//! Provider trait for LLM implementations

use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{GenerateRequest, GenerateResponse},
};

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a complete response from the LLM
    ///
    /// Exactly one outbound call per invocation. There is no retry; a failure
    /// is returned to the caller as-is.
    ///
    /// # Arguments
    /// * `request` - The generation request with system prompt, messages and config
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;
}
