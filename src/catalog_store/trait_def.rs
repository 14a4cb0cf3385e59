//! CatalogStore trait definition.

use super::models::{CatalogEntry, CompoundKey, NewCatalogEntry};
use crate::error::LibraryResult;

/// Storage of catalog songs.
///
/// Entries are never physically removed except by [`CatalogStore::clear_catalog`]:
/// deleting an entry only marks it, and every lookup ignores marked entries.
pub trait CatalogStore: Send + Sync {
    /// Adds a new entry. Fails with `Conflict` when an active entry already uses
    /// the same compound key.
    fn create_entry(&self, entry: &NewCatalogEntry) -> LibraryResult<CatalogEntry>;

    fn get_entry_by_id(&self, id: i64) -> LibraryResult<CatalogEntry>;

    fn get_entry_by_key(&self, key: &CompoundKey) -> LibraryResult<CatalogEntry>;

    /// All active entries, by id or by play count descending.
    fn get_all_entries(&self, sort_by_play_count: bool) -> LibraryResult<Vec<CatalogEntry>>;

    /// A uniformly random active entry, `Empty` when there is none.
    fn get_random_entry(&self) -> LibraryResult<CatalogEntry>;

    /// Soft-deletes the entry and drops it from the playlist.
    fn delete_entry(&self, id: i64) -> LibraryResult<()>;

    fn increment_play_count(&self, id: i64) -> LibraryResult<CatalogEntry>;

    /// Removes every entry, deleted or not, empties the playlist and restarts id
    /// assignment.
    fn clear_catalog(&self) -> LibraryResult<()>;

    /// Checks that the database answers and holds the expected tables.
    fn check_health(&self) -> LibraryResult<()>;
}
