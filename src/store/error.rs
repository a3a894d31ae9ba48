// src/store/error.rs
//! Error types for recipe store operations

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Conditions a store operation signals to its caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Payload is missing required fields
    #[error("missing required field(s): {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// Update body carries an `id` that differs from the addressed recipe
    #[error("request path id ({path}) and body id ({body}) must match")]
    IdMismatch { path: String, body: String },

    /// No recipe with this id
    #[error("recipe '{0}' not found")]
    NotFound(String),

    /// The id generator kept producing ids that were already issued
    #[error("could not allocate a fresh recipe id after {0} attempts")]
    IdsExhausted(usize),
}

impl StoreError {
    /// True for errors caused by a bad request body
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::IdMismatch { .. })
    }

    /// True when the addressed recipe does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
