use crate::catalog_store::CatalogEntry;
use serde::{Deserialize, Serialize};

/// A catalog song at a position of the playlist. Track numbers are 1-based and
/// dense: a playlist of N songs uses exactly the numbers 1 to N.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub track_number: usize,
    #[serde(flatten)]
    pub song: CatalogEntry,
}
