//! # Utility Modules
//!
//! Constants and small helpers shared across the crate.
//!
//! ## Available Utilities
//!
//! - **Constants** (`constant`) - Defaults for configuration and formatting

pub mod constant;
