//! Error types shared across GazeCue crates.

use std::path::PathBuf;

/// Top-level error type for GazeCue operations.
///
/// Every variant is fatal for the run that produced it. Per-frame problems
/// that the pipeline recovers from live in the detection crate instead.
#[derive(Debug, thiserror::Error)]
pub enum GazecueError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Frame source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("Trace error: {message}")]
    Trace { message: String },

    #[error("Caption error: {message}")]
    Caption { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported video: {path}")]
    UnsupportedVideo { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GazecueError.
pub type GazecueResult<T> = Result<T, GazecueError>;

impl GazecueError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: msg.into(),
        }
    }

    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: msg.into(),
        }
    }

    pub fn trace(msg: impl Into<String>) -> Self {
        Self::Trace {
            message: msg.into(),
        }
    }

    pub fn caption(msg: impl Into<String>) -> Self {
        Self::Caption {
            message: msg.into(),
        }
    }

    /// Whether this error was raised before any frame was read.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}
