//! # Panic Mapping
//!
//! A panicking controller is caught by [`tower_http::catch_panic`] and
//! rendered through the same payload as every other error.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::models::ExceptionResponse;

/// Builds the `500` response for a caught panic.
///
/// The panic message becomes the payload `message` when it is a string.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unhandled panic".to_string()
    };

    error!(panic = %message, "Controller panicked");
    ExceptionResponse::new(StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn message_of(response: Response) -> Value {
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "INTERNAL_SERVER_ERROR");
        body["message"].clone()
    }

    #[tokio::test]
    async fn str_payload_becomes_the_message() {
        let response = panic_response(Box::new("store unavailable"));
        assert_eq!(message_of(response).await, "store unavailable");
    }

    #[tokio::test]
    async fn string_payload_becomes_the_message() {
        let response = panic_response(Box::new(format!("record {} is corrupt", 7)));
        assert_eq!(message_of(response).await, "record 7 is corrupt");
    }

    #[tokio::test]
    async fn opaque_payload_uses_a_generic_message() {
        let response = panic_response(Box::new(42_u32));
        assert_eq!(message_of(response).await, "Unhandled panic");
    }
}
