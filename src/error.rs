//! This module defines the single, unified error type for the entire sensory library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SensoryError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// A denormalized, rounded key id has no entry in the min/max index.
    /// The dataset cannot be recovered without it, so the whole call aborts.
    #[error("Key {0} not found in min/max index")]
    MinMaxKeyMiss(i64),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error from the Serde JSON library, typically while reading or
    /// writing a persisted vocabulary or min/max index.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
