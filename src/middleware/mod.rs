//! # Middleware Components
//!
//! Cross-cutting layers woven around controller routes.

pub mod catch_panic;
pub mod request_logging;

pub use catch_panic::panic_response;
pub use request_logging::{BodyLimit, request_logging, request_url};
