//! # Centralized Error Handling
//!
//! Every controller returns [`ServiceResult`]. Whatever goes wrong during
//! request handling ends up as a [`ServiceError`], and its [`IntoResponse`]
//! implementation is the single place where errors are classified into an
//! HTTP status and rendered as an [`ExceptionResponse`].
//!
//! | Error                | Status                       |
//! |----------------------|------------------------------|
//! | `RecordNotFound`     | `500 Internal Server Error`  |
//! | `Validation`         | `206 Partial Content`        |
//! | `NotReadable`        | status of the rejection      |
//! | `MethodNotSupported` | `405 Method Not Allowed`     |
//! | `NoHandlerFound`     | `404 Not Found`              |
//! | `PayloadTooLarge`    | `413 Payload Too Large`      |
//! | `Unhandled`          | `500 Internal Server Error`  |

use axum::{
    BoxError,
    extract::{
        FromRequest, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use validator::{Validate, ValidationErrors};

use crate::models::{ExceptionMessage, ExceptionResponse};

/// Central application error type.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    RecordNotFound(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{message}")]
    NotReadable { status: StatusCode, message: String },

    #[error("Request method '{method}' not supported")]
    MethodNotSupported { method: Method },

    #[error("No handler found for {method} {path}")]
    NoHandlerFound { method: Method, path: String },

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("{0}")]
    Unhandled(#[from] BoxError),
}

impl ServiceError {
    /// Wraps any error that has no dedicated variant.
    pub fn unhandled(err: impl Into<BoxError>) -> Self {
        ServiceError::Unhandled(err.into())
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        // Type mismatches count as unreadable, same as syntax errors.
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::BAD_REQUEST
            }
            other => other.status(),
        };
        ServiceError::NotReadable {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::NotReadable {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let response = match self {
            ServiceError::RecordNotFound(message) => {
                info!("Handling record-not-found error");
                build_exception_response(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            ServiceError::Validation(errors) => {
                info!("Handling field validation error");
                ExceptionResponse::new(
                    StatusCode::PARTIAL_CONTENT,
                    ExceptionMessage::FieldValidationFailed.to_string(),
                )
                .with_errors(field_error_messages(&errors))
            }
            ServiceError::NotReadable { status, message } => {
                info!("Handling unreadable request error");
                build_exception_response(status, message)
            }
            err @ ServiceError::MethodNotSupported { .. } => {
                info!("Handling unsupported method error");
                build_exception_response(StatusCode::METHOD_NOT_ALLOWED, err.to_string())
            }
            err @ ServiceError::NoHandlerFound { .. } => {
                info!("Handling no-handler-found error");
                build_exception_response(StatusCode::NOT_FOUND, err.to_string())
            }
            err @ ServiceError::PayloadTooLarge { .. } => {
                warn!("Handling oversized payload error");
                build_exception_response(StatusCode::PAYLOAD_TOO_LARGE, err.to_string())
            }
            ServiceError::Unhandled(e) => {
                error!(error = %e, "Handling unhandled error");
                build_exception_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        debug!(?response, "Error Response Generated");
        response.into_response()
    }
}

fn build_exception_response(status: StatusCode, message: String) -> ExceptionResponse {
    info!("Building error response");
    ExceptionResponse::new(status, message)
}

/// Flattens field errors into `"<field> <message>"` entries, ordered by field.
///
/// Errors without a message fall back to their validator code.
pub fn field_error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, messages)| {
            messages
                .into_iter()
                .map(move |message| [field.as_str(), message.as_str()].join(" "))
        })
        .collect()
}

/// Convenience Result type alias that uses ServiceError as the error type.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// JSON extractor that validates the payload before the handler runs.
///
/// Deserialization failures become [`ServiceError::NotReadable`], and
/// constraint violations become [`ServiceError::Validation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Fallback for paths that match a route but not its method.
pub async fn method_not_supported(method: Method) -> ServiceError {
    ServiceError::MethodNotSupported { method }
}

/// Fallback for paths that match no route.
pub async fn no_handler_found(method: Method, uri: Uri) -> ServiceError {
    ServiceError::NoHandlerFound {
        method,
        path: uri.path().to_string(),
    }
}
