//! # Request/Response Logging Interceptor
//!
//! Woven around controller routes with [`axum::Router::route_layer`], this
//! middleware logs the URL of every intercepted request, its body, and the
//! body of the response the controller produced. Error payloads rendered by
//! [`ServiceError`] flow back through here and are logged the same way.
//!
//! Bodies are buffered in memory up to [`BodyLimit`] bytes:
//!
//! - a request body above the limit is rejected with `413` before the
//!   controller runs
//! - a response body above the limit (or of unknown size) is passed through
//!   untouched and not logged

use std::error::Error;
use std::time::Instant;

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{OriginalUri, Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body::Body as _;
use http_body_util::LengthLimitError;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

/// Maximum number of bytes buffered per body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);

/// Logs the request URL, request body and response body around a controller.
///
/// # Log Lines
///
/// - `info`  `REQUEST_ENTRY : <url>`
/// - `debug` `Request Body : <body>` (non-empty bodies only)
/// - `debug` `Response Body : <body>` (non-empty bodies only)
/// - `info`  `REQUEST_EXIT :<url>` with `status` and `elapsed_ms`
///
/// # Returns
///
/// - **Success**: The controller's response with its body intact
/// - **Failure**: `413 Payload Too Large` when the request body exceeds the
///   limit, `500 Internal Server Error` when a body cannot be read. These
///   responses are logged and closed with `REQUEST_EXIT` like any other.
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn request_logging(
    State(BodyLimit(limit)): State<BodyLimit>,
    req: Request,
    next: Next,
) -> Response {
    info!("Calling request logging interceptor");
    let start = Instant::now();

    let url = request_url(&req);
    info!("REQUEST_ENTRY : {url}");

    let (parts, body) = req.into_parts();
    let response = match buffer_request_body(body, limit).await {
        Ok(bytes) => {
            if !bytes.is_empty() {
                debug!("Request Body : {}", String::from_utf8_lossy(&bytes));
            }
            next.run(Request::from_parts(parts, Body::from(bytes))).await
        }
        Err(e) => e.into_response(),
    };
    let response = log_response_body(response, limit).await;

    info!(
        status = %response.status(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "REQUEST_EXIT :{url}"
    );
    info!("Exit request logging interceptor");
    response
}

/// Reconstructs the URL the client requested, without the query string.
///
/// The scheme honors `X-Forwarded-Proto`, the host comes from the `Host`
/// header, and the path is taken from [`OriginalUri`] so nested routers
/// report the full path.
pub fn request_url(req: &Request) -> String {
    let headers = req.headers();

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| req.uri().scheme_str())
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()))
        .unwrap_or("localhost");

    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path())
        .unwrap_or_else(|| req.uri().path());

    format!("{scheme}://{host}{path}")
}

async fn buffer_request_body(body: Body, limit: usize) -> ServiceResult<Bytes> {
    if body.size_hint().lower() > limit as u64 {
        return Err(ServiceError::PayloadTooLarge { limit });
    }

    to_bytes(body, limit).await.map_err(|e| {
        let e = e.into_inner();
        if is_length_limit(&*e) {
            ServiceError::PayloadTooLarge { limit }
        } else {
            ServiceError::Unhandled(e)
        }
    })
}

async fn log_response_body(response: Response, limit: usize) -> Response {
    let (parts, body) = response.into_parts();

    match body.size_hint().upper() {
        Some(0) => Response::from_parts(parts, body),
        Some(upper) if upper <= limit as u64 => match to_bytes(body, limit).await {
            Ok(bytes) => {
                if !bytes.is_empty() {
                    debug!("Response Body : {}", String::from_utf8_lossy(&bytes));
                }
                Response::from_parts(parts, Body::from(bytes))
            }
            Err(e) => {
                let (parts, body) = ServiceError::Unhandled(e.into_inner())
                    .into_response()
                    .into_parts();
                let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
                debug!("Response Body : {}", String::from_utf8_lossy(&bytes));
                Response::from_parts(parts, Body::from(bytes))
            }
        },
        _ => {
            debug!("Response Body : <body omitted>");
            Response::from_parts(parts, body)
        }
    }
}

fn is_length_limit(err: &(dyn Error + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use axum::http::Uri;

    use super::*;

    fn request(uri: &str) -> Request {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn url_uses_host_header_and_drops_query() {
        let mut req = request("/api/records?page=2");
        req.headers_mut()
            .insert(header::HOST, "example.com:8090".parse().unwrap());

        assert_eq!(request_url(&req), "http://example.com:8090/api/records");
    }

    #[test]
    fn url_honors_forwarded_proto() {
        let mut req = request("/api/records");
        req.headers_mut()
            .insert(header::HOST, "example.com".parse().unwrap());
        req.headers_mut()
            .insert("x-forwarded-proto", "https, http".parse().unwrap());

        assert_eq!(request_url(&req), "https://example.com/api/records");
    }

    #[test]
    fn url_prefers_original_uri_for_nested_routes() {
        let mut req = request("/records");
        req.extensions_mut()
            .insert(OriginalUri(Uri::from_static("/api/records")));

        assert_eq!(request_url(&req), "http://localhost/api/records");
    }

    #[test]
    fn url_falls_back_to_absolute_uri() {
        let req = request("https://records.internal/api/records/1");
        assert_eq!(
            request_url(&req),
            "https://records.internal/api/records/1"
        );
    }

    #[tokio::test]
    async fn oversized_request_body_is_rejected() {
        let result = buffer_request_body(Body::from("0123456789"), 4).await;
        assert!(matches!(
            result,
            Err(ServiceError::PayloadTooLarge { limit: 4 })
        ));
    }

    #[tokio::test]
    async fn request_body_within_limit_is_buffered() {
        let bytes = buffer_request_body(Body::from("hello"), 5).await.unwrap();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn oversized_response_body_passes_through() {
        let response = Response::new(Body::from("a long response body"));
        let response = log_response_body(response, 4).await;

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"a long response body");
    }
}
