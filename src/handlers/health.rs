// GET /api/health handler

use std::convert::Infallible;

use crate::models::{iso_timestamp, HealthResponse};

pub async fn health_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&HealthResponse {
        status: "healthy".to_string(),
        timestamp: iso_timestamp(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
