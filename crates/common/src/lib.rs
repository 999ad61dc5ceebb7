//! GazeCue Common Utilities
//!
//! Shared infrastructure for all GazeCue crates:
//! - Error types and result aliases
//! - Frame clock for converting frame indices to timeline seconds
//! - Tracing/logging initialization
//! - Configuration loading and validation

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
