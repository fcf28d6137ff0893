//! Tactile Common Utilities
//!
//! Shared infrastructure for all Tactile crates:
//! - Error types and result aliases
//! - Pan recognizer thresholds and application configuration
//! - Tracing/logging initialization

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
