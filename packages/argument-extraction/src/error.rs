//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. None of these escape the
//! orchestrator entry points; they are absorbed into fallbacks there.

use std::time::Duration;

use thiserror::Error;

/// Why a single engine call or extraction attempt produced nothing usable.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Engine transport failed or returned a non-success response
    #[error("engine error: {0}")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Engine did not answer within the per-call deadline
    #[error("engine call timed out after {after:?}")]
    Timeout { after: Duration },

    /// Reply contained no brace-balanced object span
    #[error("no JSON object found in engine reply")]
    NoJsonObject,

    /// Object span was not valid JSON
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Parsed span was valid JSON but not an object
    #[error("extracted JSON is not an object")]
    NotAnObject,

    /// Strategy label outside the registry
    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    /// Category label outside the classifier's vocabulary
    #[error("unknown difficulty category: {label}")]
    UnknownCategory { label: String },
}

impl ExtractionError {
    /// Wrap any engine-side error.
    pub fn engine(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Engine(err.into())
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
