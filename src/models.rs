//! Core data models for the song store.
//!
//! `Song` is the only persisted entity. `SongTable` is the id -> song mapping
//! held in memory and written to disk as one JSON object.

use rustc_hash::FxHashMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Records
// ============================================================================

/// A song entry. `rifftext` is an opaque notation payload, never parsed here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>, // order preserved, duplicates allowed
    pub rifftext: String,
}

/// Write payload: a song without its id. The id comes from the caller's key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongUpdate {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rifftext: String,
}

impl SongUpdate {
    /// Attach an id. No fields are carried over from any prior version.
    pub fn into_song(self, id: impl Into<String>) -> Song {
        Song {
            id: id.into(),
            title: self.title,
            artist: self.artist,
            tags: self.tags,
            rifftext: self.rifftext,
        }
    }
}

// ============================================================================
// Table
// ============================================================================

/// Insertion-ordered mapping from id to song.
///
/// Entries live in a `Vec` in iteration order; `index` maps each key to its
/// slot. Nothing is ever removed, so slots are stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SongTable {
    entries: Vec<(String, Song)>,
    index: FxHashMap<String, usize>,
}

impl SongTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Song> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Songs in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.entries.iter().map(|(_, song)| song)
    }

    /// (key, song) pairs in iteration order.
    pub fn iter_keyed(&self) -> impl Iterator<Item = (&str, &Song)> {
        self.entries.iter().map(|(key, song)| (key.as_str(), song))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Store `song` under its own id. Returns the replaced song, if any.
    pub fn upsert(&mut self, song: Song) -> Option<Song> {
        let key = song.id.clone();
        self.insert_keyed(key, song)
    }

    /// Store `song` under `key`. An existing key keeps its position.
    pub fn insert_keyed(&mut self, key: String, song: Song) -> Option<Song> {
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, song)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, song));
                None
            }
        }
    }
}

impl FromIterator<Song> for SongTable {
    fn from_iter<I: IntoIterator<Item = Song>>(iter: I) -> Self {
        let mut table = SongTable::new();
        for song in iter {
            table.upsert(song);
        }
        table
    }
}

impl Serialize for SongTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, song) in &self.entries {
            map.serialize_entry(key, song)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SongTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = SongTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object mapping song id to song")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SongTable, A::Error> {
                let mut table = SongTable::with_capacity(map.size_hint().unwrap_or(0));
                // Any malformed record aborts the whole decode
                while let Some((key, song)) = map.next_entry::<String, Song>()? {
                    table.insert_keyed(key, song);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
