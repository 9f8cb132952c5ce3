//! HTTP-boundary errors and the rejection handler that renders them

use std::convert::Infallible;

use thiserror::Error;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::chat::ChatError;
use crate::llm::LlmError;
use crate::models::ErrorResponse;
use crate::registry::RegistryError;

/// Every failure a handler can surface. Each maps to one status code and a
/// `{"error": message}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required input field is missing
    #[error("{0}")]
    Validation(String),

    /// Request body could not be parsed
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Provider call failed; the provider's message is returned verbatim
    #[error(transparent)]
    Upstream(#[from] LlmError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(_) => ApiError::NotFound(err.to_string()),
            RegistryError::Conflict(_) => ApiError::Conflict(err.to_string()),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(message) => ApiError::Validation(message),
            ChatError::Upstream(llm) => ApiError::Upstream(llm),
        }
    }
}

impl Reply for ApiError {
    fn into_response(self) -> warp::reply::Response {
        if let ApiError::Upstream(source) = &self {
            tracing::error!(error = %source, "provider call failed");
        }
        error_reply(self.status(), self.to_string())
    }
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> warp::reply::Response {
    let body = ErrorResponse {
        error: message.into(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

/// Convert filter-level rejections (unknown route, bad query, wrong method,
/// forbidden CORS preflight) into JSON error responses
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if err.is_not_found() {
        return Ok(error_reply(StatusCode::NOT_FOUND, "Not found"));
    }

    if let Some(query_err) = err.find::<warp::reject::InvalidQuery>() {
        return Ok(error_reply(StatusCode::BAD_REQUEST, query_err.to_string()));
    }

    if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        return Ok(error_reply(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large",
        ));
    }

    if let Some(cors_err) = err.find::<warp::filters::cors::CorsForbidden>() {
        tracing::debug!(error = %cors_err, "rejected CORS preflight");
        return Ok(error_reply(StatusCode::FORBIDDEN, cors_err.to_string()));
    }

    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(error_reply(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"));
    }

    tracing::error!(rejection = ?err, "unhandled rejection");
    Ok(error_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("Message is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(RegistryError::NotFound("1".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(RegistryError::Conflict("1".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(LlmError::EmptyResponse).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_message_is_verbatim() {
        let err = ApiError::from(ChatError::Upstream(LlmError::AuthenticationError(
            "CLAUDE_API_KEY is not set".into(),
        )));
        assert_eq!(err.to_string(), "Authentication error: CLAUDE_API_KEY is not set");
    }

    #[test]
    fn test_registry_messages() {
        assert_eq!(
            ApiError::from(RegistryError::NotFound("42".into())).to_string(),
            "User not found"
        );
        assert_eq!(
            ApiError::from(RegistryError::Conflict("42".into())).to_string(),
            "User with id 42 already exists"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::Conflict("dup".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
