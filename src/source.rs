//! Fragment source port
//!
//! The transport/caching layer that actually issues paginated requests is
//! an external collaborator; the engine only sees this trait. A failed
//! fetch is surfaced as retryable so callers can keep showing the last
//! successfully merged list instead of blanking the view.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::RootSnapshot;
use crate::query::TreeQuery;

/// Error surfaced by a fragment source
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure; retryable unless stated otherwise
    #[error("transport error: {message}")]
    Transport { message: String, retryable: bool },

    /// The response did not match the wire contract
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local snapshot file could not be read
    #[error("cannot read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Should the caller retry the same query later?
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { retryable, .. } => *retryable,
            FetchError::Decode(_) | FetchError::Read { .. } => false,
        }
    }
}

/// Supplies root snapshots for materialization queries
pub trait FragmentSource {
    fn fetch(&self, query: &TreeQuery) -> Result<RootSnapshot, FetchError>;
}

/// Reads a pre-captured snapshot from a JSON file.
///
/// Used by the CLI and by tests; the query is accepted for interface
/// parity but a file naturally holds exactly one captured page.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FragmentSource for JsonFileSource {
    fn fetch(&self, _query: &TreeQuery) -> Result<RootSnapshot, FetchError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| FetchError::Read {
            path: self.path.clone(),
            source,
        })?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }
}
