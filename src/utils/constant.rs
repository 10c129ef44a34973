//! # Application Constants
//!
//! Defaults used when the corresponding environment variable is not set.

/// Address the server binds to when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8090";

/// Maximum number of bytes buffered per request or response body for logging.
///
/// Request bodies above this size are rejected before reaching a controller.
/// Response bodies above this size are passed through without being logged.
pub const DEFAULT_LOG_BODY_LIMIT: usize = 64 * 1024;

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "weave=info,tower_http=info";

/// Name reported by the JSON log formatter.
pub const SERVICE_NAME: &str = "weave";

/// Pattern of the `timestamp` field in error payloads (`yyyy-MM-dd HH:mm:ss`).
pub const TIMESTAMP_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
