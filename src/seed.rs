//! Demo songs written on first run, when no storage file exists yet.

use crate::models::{Song, SongTable};
use once_cell::sync::Lazy;

/// (id, title, artist, tags, rifftext)
static SEED_SONGS: Lazy<Vec<Song>> = Lazy::new(|| {
    [
        (
            "1",
            "Blues in A",
            "Demo Artist",
            ["blues", "A"],
            "KEY A\nTEMPO 100\n[verse]\nA7 D7 A7 E7 D7 A7\n",
        ),
        (
            "2",
            "Funky Jam in E",
            "Demo Artist",
            ["funk", "E"],
            "KEY E\nTEMPO 110\n[groove]\nE7 E7 E7 E7\n",
        ),
        (
            "3",
            "Ballad in C",
            "Someone Else",
            ["ballad", "C"],
            "KEY C\nTEMPO 70\n[verse]\nC F G C\n",
        ),
    ]
    .into_iter()
    .map(|(id, title, artist, tags, rifftext)| Song {
        id: id.to_string(),
        title: title.to_string(),
        artist: Some(artist.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rifftext: rifftext.to_string(),
    })
    .collect()
});

/// Fresh table holding the seed songs, ids "1", "2", "3" in that order.
pub fn seed_table() -> SongTable {
    SEED_SONGS.iter().cloned().collect()
}
