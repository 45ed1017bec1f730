//! File-backed song store.
//!
//! The whole table is kept in memory and rewritten to a single JSON file on
//! every upsert. Writes go to a `.tmp` sibling first and are renamed over the
//! data file, so the data file is always either the old or the new snapshot.
//!
//! Upserts hold the write lock across copy, save and commit. A failed save
//! leaves both the file and the in-memory table at their previous state.

use crate::error::{Result, StoreError};
use crate::models::{Song, SongTable, SongUpdate};
use crate::query;
use crate::safety::{temp_path_for, validate_data_path};
use crate::seed::seed_table;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use tracing::{debug, error, info, warn};

// ============================================================================
// Persistence
// ============================================================================

/// Load the table from `path`.
///
/// - Missing file: write the seed songs to `path` and return them.
/// - Unreadable or undecodable file: log and return an empty table. Corrupt
///   data is not salvaged record by record; the store stays available empty.
/// - Only a failed seed write is returned as an error.
pub fn load(path: &Path) -> Result<SongTable> {
    if !path.exists() {
        let seed = seed_table();
        info!(path = %path.display(), songs = seed.len(), "No storage file, seeding demo songs");
        save(path, &seed)?;
        return Ok(seed);
    }

    match read_table(path) {
        Ok(table) => {
            for (key, song) in table.iter_keyed() {
                if key != song.id {
                    warn!(key, id = %song.id, "Stored song id differs from its key");
                }
            }
            info!(path = %path.display(), songs = table.len(), "Loaded songs");
            Ok(table)
        }
        Err(e) => {
            error!("{}", e);
            Ok(SongTable::new())
        }
    }
}

fn read_table(path: &Path) -> Result<SongTable> {
    let unreadable = |reason: String| StoreError::Unreadable {
        path: path.to_path_buf(),
        reason,
    };
    let raw = fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| unreadable(e.to_string()))
}

/// Persist the full table to `path` through the temp sibling.
///
/// Output is 2-space indented UTF-8 with non-ASCII left unescaped.
pub fn save(path: &Path, table: &SongTable) -> Result<()> {
    let json = serde_json::to_string_pretty(table)?;
    let tmp = temp_path_for(path);

    if let Err(source) = write_synced(&tmp, json.as_bytes()) {
        // Best effort; the data file itself was never touched.
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Write { path: tmp, source });
    }

    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    sync_parent_dir(path);

    debug!(path = %path.display(), songs = table.len(), "Saved songs");
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

// Makes the rename itself durable. Best effort: the data is already in place.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if let Err(e) = fs::File::open(parent).and_then(|dir| dir.sync_all()) {
        debug!(dir = %parent.display(), "Could not sync directory: {}", e);
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}

// ============================================================================
// Store handle
// ============================================================================

/// Owned store: the in-memory table plus the file it is persisted to.
///
/// Construct once with [`SongStore::open`] and share by reference (or `Arc`)
/// with whatever handles requests.
#[derive(Debug)]
pub struct SongStore {
    path: PathBuf,
    table: RwLock<SongTable>,
}

impl SongStore {
    /// Validate `path` and load (or seed) the table from it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        validate_data_path(&path)?;
        let table = load(&path)?;
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // The table is only ever swapped whole, so a poisoned lock still guards
    // a consistent snapshot.
    fn read(&self) -> RwLockReadGuard<'_, SongTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create or fully replace the song at `id`, then persist the whole table.
    ///
    /// No fields are merged from a prior version. Errors are write failures;
    /// in that case nothing changes, in memory or on disk.
    pub fn upsert(&self, id: &str, update: SongUpdate) -> Result<Song> {
        let song = update.into_song(id);

        let mut live = self.table.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = live.clone();
        let replaced = next.upsert(song.clone()).is_some();
        save(&self.path, &next)?;
        *live = next;

        info!(id, replaced, "Upserted song");
        Ok(song)
    }

    pub fn get(&self, id: &str) -> Result<Song> {
        query::get_by_id(&self.read(), id).cloned()
    }

    pub fn list(&self, query: Option<&str>) -> Vec<Song> {
        let table = self.read();
        let songs: Vec<Song> = query::list(&table, query).into_iter().cloned().collect();
        debug!(query = query.unwrap_or(""), matched = songs.len(), "Listed songs");
        songs
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> SongTable {
        self.read().clone()
    }
}
