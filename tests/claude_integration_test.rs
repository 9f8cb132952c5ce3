//! Integration tests for the Claude client
//!
//! These tests make real API calls. To run them:
//! 1. Put `CLAUDE_API_KEY=...` in `.env` (or export it)
//! 2. Run: `cargo test --test claude_integration_test -- --ignored`

use std::sync::Arc;

use campaign_assistant::chat::ChatGateway;
use campaign_assistant::llm::claude::client::DEFAULT_BASE_URL;
use campaign_assistant::llm::{
    ClaudeClient, ClaudeModel, GenerateRequest, GenerationConfig, LlmError, LlmProvider,
};

fn create_test_client() -> ClaudeClient {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("CLAUDE_API_KEY").expect("CLAUDE_API_KEY required");
    ClaudeClient::new(Some(api_key), DEFAULT_BASE_URL).expect("Failed to create Claude client")
}

#[tokio::test]
#[ignore] // Run with --ignored flag
async fn test_claude_simple_generation() {
    let client = create_test_client();

    let request = GenerateRequest::single_turn(
        "Answer with just the number.",
        "What is 2+2?",
        GenerationConfig::new(ClaudeModel::Sonnet35.as_str(), 20),
    );

    let response = client.generate(request).await.expect("generation failed");
    let text = response.first_text().expect("no text returned");

    println!("Response: {}", text);
    assert!(text.contains('4'));
    assert!(response.usage.map(|u| u.total_tokens > 0).unwrap_or(false));
}

#[tokio::test]
#[ignore] // Run with --ignored flag
async fn test_gateway_quick_action_against_live_api() {
    let gateway = ChatGateway::new(Arc::new(create_test_client()));

    let reply = gateway
        .run_quick_action("analyze_performance", None)
        .await
        .expect("quick action failed");

    println!("Response: {}", reply.response);
    assert!(!reply.response.is_empty());
    assert_eq!(reply.action, "analyze_performance");
}

#[tokio::test]
#[ignore] // Run with --ignored flag
async fn test_invalid_key_surfaces_provider_error() {
    let client = ClaudeClient::new(Some("sk-invalid".to_string()), DEFAULT_BASE_URL).unwrap();

    let request = GenerateRequest::single_turn(
        "system",
        "hi",
        GenerationConfig::new(ClaudeModel::Sonnet35.as_str(), 10),
    );

    let err = client.generate(request).await.unwrap_err();
    assert!(matches!(err, LlmError::ProviderError { .. }));
}
