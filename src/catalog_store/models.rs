use serde::{Deserialize, Serialize};

/// A song known to the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub artist: String,
    pub title: String,
    pub year: i64,
    pub genre: String,
    /// Length of the song in seconds.
    pub duration: i64,
    pub play_count: i64,
}

impl CatalogEntry {
    pub fn key(&self) -> CompoundKey {
        CompoundKey {
            artist: self.artist.clone(),
            title: self.title.clone(),
            year: self.year,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCatalogEntry {
    pub artist: String,
    pub title: String,
    pub year: i64,
    pub genre: String,
    pub duration: i64,
}

/// Identifies a song among the non-deleted catalog entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundKey {
    pub artist: String,
    pub title: String,
    pub year: i64,
}

impl std::fmt::Display for CompoundKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' by {} ({})", self.title, self.artist, self.year)
    }
}
