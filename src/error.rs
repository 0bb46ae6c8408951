//! Error types for Spreadbase
//!
//! This module defines all error types used by the table model.

use thiserror::Error;

/// The main error type for Spreadbase
#[derive(Error, Debug)]
pub enum Error {
    // ========== Lookup Errors ==========
    #[error("The index {index} is out of bounds for {size} columns")]
    IndexOutOfBounds { index: usize, size: usize },

    // ========== Column Errors ==========
    #[error("Column error: column name must not be empty")]
    EmptyColumnName,

    // ========== Type Errors ==========
    #[error("Type error: value {value} is out of range for {definition}")]
    ValueOutOfRange { value: i64, definition: String },

    // ========== Source Errors ==========
    #[error("Source error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Spreadbase operations
pub type Result<T> = std::result::Result<T, Error>;
