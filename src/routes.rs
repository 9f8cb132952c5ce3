// Route definitions: one filter tree for the chat gateway, the user
// registry, health and the bundled frontend

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use warp::Filter;

use crate::chat::ChatGateway;
use crate::error::{handle_rejection, ApiError};
use crate::handlers;
use crate::models::{SearchQuery, UserListQuery};
use crate::registry::UserRegistry;
use crate::AppState;

const CORS_METHODS: &[&str] = &["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

/// Request headers a browser may ask for in a preflight. warp has no
/// wildcard, so this lists what frontends and HTTP clients commonly send.
const CORS_HEADERS: &[&str] = &[
    "accept",
    "accept-language",
    "authorization",
    "cache-control",
    "content-language",
    "content-type",
    "origin",
    "pragma",
    "x-requested-with",
];

pub fn configure_routes(
    state: AppState,
    static_dir: PathBuf,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(CORS_METHODS.to_vec())
        .allow_headers(CORS_HEADERS.to_vec());

    api_routes(state)
        .or(static_routes(static_dir))
        .with(cors)
        .recover(handle_rejection)
}

/// Every JSON endpoint, without the static fallback
pub fn api_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    ai_routes(state.gateway.clone())
        .or(health_route())
        .or(user_routes(state.registry))
}

fn ai_routes(
    gateway: ChatGateway,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let ai = warp::path("api").and(warp::path("ai"));

    // POST /api/ai/chat
    let chat = ai
        .and(warp::path("chat"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_gateway(gateway.clone()))
        .and(json_body())
        .and_then(handlers::chat_handler);

    // POST /api/ai/quick-action
    let quick_action = ai
        .and(warp::path("quick-action"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_gateway(gateway))
        .and(json_body())
        .and_then(handlers::quick_action_handler);

    chat.or(quick_action)
}

fn health_route() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // GET /api/health
    warp::path("api")
        .and(warp::path("health"))
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler)
}

fn user_routes(
    registry: Arc<UserRegistry>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let users = warp::path("users");

    // GET /users?role=
    let list = users
        .and(warp::path::end())
        .and(warp::get())
        .and(with_registry(registry.clone()))
        .and(warp::query::<UserListQuery>())
        .and_then(handlers::list_users_handler);

    // POST /users
    let create = users
        .and(warp::path::end())
        .and(warp::post())
        .and(with_registry(registry.clone()))
        .and(json_body())
        .and_then(handlers::create_user_handler);

    // GET /users/search?q=  (must precede /users/{id})
    let search = users
        .and(warp::path("search"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_registry(registry.clone()))
        .and(warp::query::<SearchQuery>())
        .and_then(handlers::search_users_handler);

    let user = users.and(decoded_param());

    // GET /users/{id}
    let get = user
        .clone()
        .and(warp::path::end())
        .and(warp::get())
        .and(with_registry(registry.clone()))
        .and_then(handlers::get_user_handler);

    // PUT /users/{id}
    let update = user
        .clone()
        .and(warp::path::end())
        .and(warp::put())
        .and(with_registry(registry.clone()))
        .and(json_body())
        .and_then(handlers::update_user_handler);

    // DELETE /users/{id}
    let delete = user
        .clone()
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_registry(registry.clone()))
        .and_then(handlers::delete_user_handler);

    // POST /users/{id}/login
    let login = user
        .clone()
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_registry(registry.clone()))
        .and_then(handlers::login_handler);

    // PUT /users/{id}/preferences/{key}
    let preference = user
        .clone()
        .and(warp::path("preferences"))
        .and(decoded_param())
        .and(warp::path::end())
        .and(warp::put())
        .and(with_registry(registry.clone()))
        .and(json_body())
        .and_then(handlers::set_preference_handler);

    let project = user
        .and(warp::path("projects"))
        .and(decoded_param())
        .and(warp::path::end());

    // POST /users/{id}/projects/{project_id}
    let add_project = project
        .clone()
        .and(warp::post())
        .and(with_registry(registry.clone()))
        .and_then(handlers::add_project_handler);

    // DELETE /users/{id}/projects/{project_id}
    let remove_project = project
        .and(warp::delete())
        .and(with_registry(registry))
        .and_then(handlers::remove_project_handler);

    list.or(create)
        .or(search)
        .or(get)
        .or(update)
        .or(delete)
        .or(login)
        .or(preference)
        .or(add_project)
        .or(remove_project)
}

/// Files from `static_dir`, falling back to `index.html` for client-side routes
fn static_routes(
    static_dir: PathBuf,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let index = static_dir.join("index.html");
    warp::get().and(warp::fs::dir(static_dir).or(warp::fs::file(index)))
}

fn with_gateway(
    gateway: ChatGateway,
) -> impl Filter<Extract = (ChatGateway,), Error = Infallible> + Clone {
    warp::any().map(move || gateway.clone())
}

fn with_registry(
    registry: Arc<UserRegistry>,
) -> impl Filter<Extract = (Arc<UserRegistry>,), Error = Infallible> + Clone {
    warp::any().map(move || registry.clone())
}

/// One path segment, percent-decoded. warp hands segments over raw, so an
/// id like `john doe` arrives as `john%20doe`. Invalid UTF-8 is not a route.
fn decoded_param() -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    warp::path::param::<String>().and_then(|segment: String| async move {
        percent_decode_str(&segment)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(|_| warp::reject::not_found())
    })
}

/// Read the whole body and parse it as JSON. Parse failures are handed to
/// the handler so they render as a 400 with the usual error body.
fn json_body<T>() -> impl Filter<Extract = (Result<T, ApiError>,), Error = warp::Rejection> + Clone
where
    T: DeserializeOwned + Send + 'static,
{
    warp::body::bytes().map(|body: Bytes| parse_json_body::<T>(&body))
}

fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
}
