//! Error types for SlotStore
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for SlotStore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A mutation was requested but the data file does not exist
    #[error("Data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    // -------------------------------------------------------------------------
    // Data File Errors
    // -------------------------------------------------------------------------
    #[error("Data file corrupted at offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Decoding error: {0}")]
    Decoding(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Build a corruption error for the record starting at `offset`
    pub(crate) fn corruption(offset: u64, reason: impl Into<String>) -> Self {
        StoreError::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// True for errors that mean the file contents cannot be trusted
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Corruption { .. })
    }
}
