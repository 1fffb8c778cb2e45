// crates/belfiore-core/src/error.rs

//! Error types for the belfiore-core crate.
//!
//! An entry that exists but does not satisfy the active filters is *not* an
//! error: it surfaces as `Ok(None)` / an absent item.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum BelfioreError {
    /// Malformed Belfiore code, token or packed field.
    #[error("Format error: {0}")]
    Format(String),

    /// Index requested outside the delimited name list.
    #[error("Range error: {0}")]
    Range(String),

    /// Mutually exclusive filter options supplied together.
    #[error("Invalid filter configuration: {0}")]
    Config(String),

    /// A caller supplied name or code pattern did not compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The dataset file or directory does not exist.
    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience `Result` type alias using the crate's `BelfioreError` type.
pub type Result<T> = std::result::Result<T, BelfioreError>;
