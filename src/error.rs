//! Error types for the song store.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Requested id is not in the table
    #[error("Song not found: {0}")]
    NotFound(String),

    /// Storage file exists but could not be read or decoded.
    /// Only raised inside `store::load`, which recovers from it.
    #[error("Storage file '{}' is unreadable: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// Writing or renaming the storage file failed
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode song table: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid data path: {0}")]
    InvalidPath(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
