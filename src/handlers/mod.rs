//! # HTTP Request Handlers
//!
//! ## Available Handlers
//!
//! - **Health Check** (`health_check`) - Application health monitoring
//! - **Records** (`records`) - In-memory record controller

mod health_check;
mod records;

pub use health_check::*;
pub use records::*;
