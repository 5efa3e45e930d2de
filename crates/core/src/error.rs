//! Core error types (pure - no I/O variants).

use thiserror::Error;

/// Maximum nesting depth for a hydration payload.
///
/// serde_json refuses to parse anything deeper than 128 levels, so a payload
/// beyond that could never round-trip through the client's `JSON.parse`.
/// It is also the closest analog to a self-referential structure, which the
/// JSON data model cannot represent at all.
pub const MAX_PAYLOAD_DEPTH: usize = 128;

/// Errors from the pure bootstrap-generation layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Circular or overly nested structure in the initial props of page \"{page}\"")]
    CircularStructure { page: String },

    #[error("Bootstrap minification failed: {0}")]
    Minify(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
