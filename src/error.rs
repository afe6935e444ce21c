//! Error types for Vectable
//!
//! The write buffer itself defines no recoverable error conditions: its
//! contracts (no duplicate inserts, no inserts after freeze, no reads
//! through an invalid cursor) are preconditions checked by debug
//! assertions, not runtime `Result`s. The error surface below covers the
//! configuration layer.

use thiserror::Error;

/// Result type alias using VectableError
pub type Result<T> = std::result::Result<T, VectableError>;

/// Unified error type for Vectable operations
#[derive(Debug, Error)]
pub enum VectableError {
    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
