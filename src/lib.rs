//! # Weave - Request Logging and Exception Mapping for axum
//!
//! Two cross-cutting concerns woven around controller routes:
//!
//! - a request/response logging interceptor that records the URL, request
//!   body and response body of every controller call
//! - a global exception handler that turns every error (including panics)
//!   into a uniform JSON payload with an HTTP status
//!
//! ## Modules
//!
//! - [`error`] - `ServiceError` and its HTTP mapping
//! - [`middleware`] - Logging interceptor and panic mapping
//! - [`models`] - Error payload DTO and the sample record model
//! - [`handlers`] - Sample records controller
//! - [`config`] / [`telemetry`] - Environment configuration and tracing setup

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod telemetry;
pub mod utils;

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use crate::config::Config;
use crate::error::{method_not_supported, no_handler_found};
use crate::handlers::{create_record, delete_record, get_record, health_check, list_records};
use crate::middleware::{BodyLimit, panic_response, request_logging};
use crate::models::AppState;

pub use crate::config::{ConfigError, LogFormat};
pub use crate::error::{ServiceError, ServiceResult, ValidatedJson};
pub use crate::models::{ExceptionMessage, ExceptionResponse};

/// Weaves the logging interceptor and exception mapping around `router`.
///
/// Only routes already registered on `router` are intercepted. Unknown paths
/// and unsupported methods are answered with the standard error payload.
/// To serve extra routes that are covered by the fallbacks but not logged,
/// compose [`intercept`] and [`handle_exceptions`] directly, as [`app`] does.
///
/// # Usage
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
///
/// let controllers = Router::<()>::new().route("/api/ping", get(|| async { "pong" }));
/// let app = weave::with_advice(controllers, &weave::config::Config::default());
/// ```
pub fn with_advice<S>(router: Router<S>, config: &Config) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    handle_exceptions(intercept(router, config))
}

/// Wraps the routes already registered on `router` with the request logging
/// interceptor and panic mapping.
pub fn intercept<S>(router: Router<S>, config: &Config) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(
        ServiceBuilder::new()
            .layer(from_fn_with_state(
                BodyLimit(config.log_body_limit),
                request_logging,
            ))
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}

/// Answers unsupported methods and unknown paths with the error payload.
///
/// The method fallback only reaches routes registered before this call.
pub fn handle_exceptions<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .method_not_allowed_fallback(method_not_supported)
        .fallback(no_handler_found)
}

/// Creates the application router: the records controller behind the
/// interceptor, plus the health check, with exception mapping over both.
pub fn app(config: &Config) -> Router {
    let state = Arc::new(AppState::new());

    let controllers = Router::new()
        .route("/api/records", get(list_records).post(create_record))
        .route("/api/records/{id}", get(get_record).delete(delete_record))
        .with_state(state);

    handle_exceptions(intercept(controllers, config).route("/health-check", get(health_check)))
}
