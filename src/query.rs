//! Read-only views over a `SongTable`: fetch by id and substring search.
//!
//! Search is plain case-insensitive containment against title, artist and
//! each tag. No tokenizing, no ranking; results keep table order.

use crate::error::{Result, StoreError};
use crate::models::{Song, SongTable};

/// Look up one song. Absent ids are `StoreError::NotFound`, never a default record.
pub fn get_by_id<'a>(table: &'a SongTable, id: &str) -> Result<&'a Song> {
    table
        .get(id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))
}

/// All songs when `query` is absent or empty, otherwise only the matches.
pub fn list<'a>(table: &'a SongTable, query: Option<&str>) -> Vec<&'a Song> {
    match query {
        Some(q) if !q.is_empty() => {
            let needle = q.to_lowercase();
            table.iter().filter(|s| matches_query(s, &needle)).collect()
        }
        _ => table.iter().collect(),
    }
}

/// `needle` must already be lowercased.
pub fn matches_query(song: &Song, needle: &str) -> bool {
    song.title.to_lowercase().contains(needle)
        || song
            .artist
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(needle))
        || song.tags.iter().any(|t| t.to_lowercase().contains(needle))
}
