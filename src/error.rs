//! Error types for downline
//!
//! Uses `thiserror` for library errors; anomalies that must not abort a
//! materialization live in [`crate::report`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for downline operations
pub type DownlineResult<T> = Result<T, DownlineError>;

/// Main error type for downline operations
#[derive(Error, Debug)]
pub enum DownlineError {
    /// Page numbers are 1-based
    #[error("invalid page {page} - pages start at 1")]
    InvalidPage { page: u32 },

    /// Page size outside the accepted range
    #[error("page size {page_size} outside allowed range 1..={max}")]
    InvalidPageSize { page_size: u32, max: u32 },

    /// min_depth greater than max_depth
    #[error("inverted depth bounds: min_depth {min} > max_depth {max}")]
    InvertedDepthBounds { min: u32, max: u32 },

    /// Snapshot violates the wire contract beyond per-fragment recovery
    #[error("malformed snapshot: {message}")]
    MalformedSnapshot { message: String },

    /// Invalid viewer configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
