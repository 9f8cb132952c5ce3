// /users handlers

use std::convert::Infallible;
use std::sync::Arc;

use warp::http::StatusCode;
use warp::reply::Response;

use super::reply_json;
use crate::error::ApiError;
use crate::models::{
    MessageResponse, PreferenceRequest, SearchQuery, UserListQuery, UserListResponse,
    UserResponse,
};
use crate::registry::{NewUser, UserRegistry, UserUpdate};

pub async fn list_users_handler(
    registry: Arc<UserRegistry>,
    query: UserListQuery,
) -> Result<Response, Infallible> {
    tracing::info!(role = ?query.role, "GET /users");

    let users = match query.role {
        Some(role) => registry.list_by_role(&role).await,
        None => registry.list().await,
    };

    Ok(reply_json(Ok(UserListResponse::new(users)), StatusCode::OK))
}

pub async fn search_users_handler(
    registry: Arc<UserRegistry>,
    query: SearchQuery,
) -> Result<Response, Infallible> {
    tracing::info!(q = ?query.q, "GET /users/search");

    let result = match query.q {
        Some(q) => Ok(UserListResponse::new(registry.search(&q).await)),
        None => Err(ApiError::Validation(
            "Query parameter q is required".to_string(),
        )),
    };

    Ok(reply_json(result, StatusCode::OK))
}

pub async fn create_user_handler(
    registry: Arc<UserRegistry>,
    body: Result<NewUser, ApiError>,
) -> Result<Response, Infallible> {
    Ok(reply_json(create_user(&registry, body).await, StatusCode::CREATED))
}

async fn create_user(
    registry: &UserRegistry,
    body: Result<NewUser, ApiError>,
) -> Result<UserResponse, ApiError> {
    let fields = body?;
    let user = registry.create(fields).await?;
    tracing::info!(id = %user.id, "POST /users");
    Ok(UserResponse::with_message(user, "User created successfully"))
}

pub async fn get_user_handler(
    id: String,
    registry: Arc<UserRegistry>,
) -> Result<Response, Infallible> {
    tracing::info!(%id, "GET /users/{{id}}");

    let result = registry
        .get(&id)
        .await
        .map(UserResponse::new)
        .map_err(ApiError::from);

    Ok(reply_json(result, StatusCode::OK))
}

pub async fn update_user_handler(
    id: String,
    registry: Arc<UserRegistry>,
    body: Result<UserUpdate, ApiError>,
) -> Result<Response, Infallible> {
    tracing::info!(%id, "PUT /users/{{id}}");
    Ok(reply_json(update_user(&registry, &id, body).await, StatusCode::OK))
}

async fn update_user(
    registry: &UserRegistry,
    id: &str,
    body: Result<UserUpdate, ApiError>,
) -> Result<UserResponse, ApiError> {
    // Unknown ids are reported before body problems
    if !registry.exists(id).await {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    let update = body?;
    let user = registry.update(id, update).await?;
    Ok(UserResponse::with_message(user, "User updated successfully"))
}

pub async fn delete_user_handler(
    id: String,
    registry: Arc<UserRegistry>,
) -> Result<Response, Infallible> {
    tracing::info!(%id, "DELETE /users/{{id}}");

    let result = registry
        .delete(&id)
        .await
        .map(|()| MessageResponse {
            message: "User deleted successfully".to_string(),
        })
        .map_err(ApiError::from);

    Ok(reply_json(result, StatusCode::OK))
}

pub async fn login_handler(
    id: String,
    registry: Arc<UserRegistry>,
) -> Result<Response, Infallible> {
    tracing::info!(%id, "POST /users/{{id}}/login");

    let result = registry
        .record_login(&id)
        .await
        .map(|user| UserResponse::with_message(user, "Login successful"))
        .map_err(ApiError::from);

    Ok(reply_json(result, StatusCode::OK))
}

pub async fn set_preference_handler(
    id: String,
    key: String,
    registry: Arc<UserRegistry>,
    body: Result<PreferenceRequest, ApiError>,
) -> Result<Response, Infallible> {
    tracing::info!(%id, %key, "PUT /users/{{id}}/preferences/{{key}}");
    Ok(reply_json(
        set_preference(&registry, &id, &key, body).await,
        StatusCode::OK,
    ))
}

async fn set_preference(
    registry: &UserRegistry,
    id: &str,
    key: &str,
    body: Result<PreferenceRequest, ApiError>,
) -> Result<UserResponse, ApiError> {
    if !registry.exists(id).await {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    let PreferenceRequest { value } = body?;
    let user = registry.set_preference(id, key, value).await?;
    Ok(UserResponse::with_message(user, "Preference updated successfully"))
}

pub async fn add_project_handler(
    id: String,
    project_id: String,
    registry: Arc<UserRegistry>,
) -> Result<Response, Infallible> {
    tracing::info!(%id, %project_id, "POST /users/{{id}}/projects/{{project_id}}");

    let result = registry
        .add_project(&id, &project_id)
        .await
        .map(|user| UserResponse::with_message(user, "Project added successfully"))
        .map_err(ApiError::from);

    Ok(reply_json(result, StatusCode::OK))
}

pub async fn remove_project_handler(
    id: String,
    project_id: String,
    registry: Arc<UserRegistry>,
) -> Result<Response, Infallible> {
    tracing::info!(%id, %project_id, "DELETE /users/{{id}}/projects/{{project_id}}");

    let result = registry
        .remove_project(&id, &project_id)
        .await
        .map(|user| UserResponse::with_message(user, "Project removed successfully"))
        .map_err(ApiError::from);

    Ok(reply_json(result, StatusCode::OK))
}
