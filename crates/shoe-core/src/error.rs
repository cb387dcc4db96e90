//! Error types for shoe-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in shoe-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Statistics data rows and shoe card lines disagree in length
    #[error("row count mismatch: statistics has {statistics} data rows, shoe has {cards} cards")]
    RowCountMismatch { statistics: usize, cards: usize },

    /// Signal suit selector is not a recognized letter or symbol
    #[error("unrecognized signal suit '{0}' (expected one of S/H/D/C or a suit symbol)")]
    SignalSuit(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
