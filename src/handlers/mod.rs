// Handlers module

pub mod chat;
pub mod health;
pub mod users;

pub use chat::{chat_handler, quick_action_handler};
pub use health::health_handler;
pub use users::{
    add_project_handler, create_user_handler, delete_user_handler, get_user_handler,
    list_users_handler, login_handler, remove_project_handler, search_users_handler,
    set_preference_handler, update_user_handler,
};

use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

use crate::error::ApiError;

/// Render a handler outcome: the body with `status` on success, or the
/// mapped error response
pub(crate) fn reply_json<T: Serialize>(result: Result<T, ApiError>, status: StatusCode) -> Response {
    match result {
        Ok(body) => warp::reply::with_status(warp::reply::json(&body), status).into_response(),
        Err(err) => err.into_response(),
    }
}
