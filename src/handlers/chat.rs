// POST /api/ai/chat and POST /api/ai/quick-action handlers

use std::convert::Infallible;

use warp::http::StatusCode;
use warp::reply::Response;

use super::reply_json;
use crate::chat::ChatGateway;
use crate::error::ApiError;
use crate::models::{ChatRequest, ChatResponse, QuickActionRequest, QuickActionResponse};

pub async fn chat_handler(
    gateway: ChatGateway,
    body: Result<ChatRequest, ApiError>,
) -> Result<Response, Infallible> {
    tracing::info!("POST /api/ai/chat");
    Ok(reply_json(send_chat(&gateway, body).await, StatusCode::OK))
}

pub async fn quick_action_handler(
    gateway: ChatGateway,
    body: Result<QuickActionRequest, ApiError>,
) -> Result<Response, Infallible> {
    Ok(reply_json(run_quick_action(&gateway, body).await, StatusCode::OK))
}

async fn send_chat(
    gateway: &ChatGateway,
    body: Result<ChatRequest, ApiError>,
) -> Result<ChatResponse, ApiError> {
    let request = body?;
    Ok(gateway.send_message(request.message.as_deref()).await?)
}

async fn run_quick_action(
    gateway: &ChatGateway,
    body: Result<QuickActionRequest, ApiError>,
) -> Result<QuickActionResponse, ApiError> {
    let request = body?;
    // A missing action becomes an empty prompt rather than a 400
    let action = request.action.unwrap_or_default();
    tracing::info!(%action, "POST /api/ai/quick-action");

    Ok(gateway
        .run_quick_action(&action, request.context.as_ref())
        .await?)
}
