//! # Health Check Handler
//!
//! Liveness endpoint for load balancers and deployment tooling. It is not a
//! controller route, so the logging interceptor does not wrap it.

use axum::http::StatusCode;
use tracing::{debug, instrument};

/// Health check endpoint that returns 200 OK.
#[instrument]
pub async fn health_check() -> StatusCode {
    debug!("Health check endpoint accessed");
    StatusCode::OK
}
