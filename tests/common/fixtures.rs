//! Test data seeded into every test server.

use super::constants::*;
use playlist_server::catalog_store::{CatalogStore, NewCatalogEntry, SqliteLibraryStore};
use playlist_server::user::UserManager;

pub fn seed_test_library(store: &SqliteLibraryStore) -> anyhow::Result<()> {
    for song in SEEDED_SONGS.iter() {
        store.create_entry(&NewCatalogEntry {
            artist: song.artist.to_string(),
            title: song.title.to_string(),
            year: song.year,
            genre: song.genre.to_string(),
            duration: song.duration,
        })?;
    }
    Ok(())
}

pub fn seed_test_users(user_manager: &UserManager) -> anyhow::Result<()> {
    user_manager.create_account(TEST_USER, TEST_PASS)?;
    Ok(())
}
