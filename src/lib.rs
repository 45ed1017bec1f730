//! Riffstore library - file-backed song store with substring search.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod query;
pub mod safety;
pub mod seed;
pub mod store;

pub use error::{Result, StoreError};
pub use models::{Song, SongTable, SongUpdate};
pub use store::SongStore;
