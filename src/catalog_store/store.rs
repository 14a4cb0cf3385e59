use super::models::{CatalogEntry, CompoundKey, NewCatalogEntry};
use super::schema::LIBRARY_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use super::validation::{validate_compound_key, validate_new_entry};
use crate::error::{LibraryError, LibraryResult};
use crate::playlist::{remove_track, track_number_of, write_cursor};
use crate::sqlite_persistence::open_versioned_db;
use anyhow::{anyhow, Result};
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Columns of `songs` in the order expected by [`entry_from_row`].
pub(crate) const ENTRY_COLUMNS: &str =
    "songs.id, songs.artist, songs.title, songs.year, songs.genre, songs.duration, songs.play_count";

pub(crate) fn entry_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<CatalogEntry> {
    Ok(CatalogEntry {
        id: row.get(offset)?,
        artist: row.get(offset + 1)?,
        title: row.get(offset + 2)?,
        year: row.get(offset + 3)?,
        genre: row.get(offset + 4)?,
        duration: row.get(offset + 5)?,
        play_count: row.get(offset + 6)?,
    })
}

pub(crate) fn find_active_entry(
    conn: &Connection,
    key: &CompoundKey,
) -> rusqlite::Result<Option<CatalogEntry>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM songs WHERE songs.artist = ?1 AND songs.title = ?2 AND songs.year = ?3 AND songs.deleted = 0",
            ENTRY_COLUMNS
        ),
        params![key.artist, key.title, key.year],
        |row| entry_from_row(row, 0),
    )
    .optional()
}

fn find_active_entry_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<CatalogEntry>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM songs WHERE songs.id = ?1 AND songs.deleted = 0",
            ENTRY_COLUMNS
        ),
        params![id],
        |row| entry_from_row(row, 0),
    )
    .optional()
}

/// Adds one play to the active song with `id`. Returns false if there is no
/// such song.
pub(crate) fn bump_play_count(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let updated = conn.execute(
        "UPDATE songs SET play_count = play_count + 1 WHERE id = ?1 AND deleted = 0",
        params![id],
    )?;
    Ok(updated > 0)
}

/// SQLite backed store holding both the catalog and the playlist.
///
/// Every operation takes the connection lock and runs inside a single
/// transaction, so concurrent callers never observe a half renumbered playlist.
#[derive(Clone)]
pub struct SqliteLibraryStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLibraryStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_versioned_db(db_path, LIBRARY_VERSIONED_SCHEMAS)?;

        let song_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM songs WHERE deleted = 0", [], |r| {
                r.get(0)
            })?;
        let playlist_len: i64 =
            conn.query_row("SELECT COUNT(*) FROM playlist", [], |r| r.get(0))?;
        info!(
            "Opened library: {} songs in catalog, {} in playlist",
            song_count, playlist_len
        );

        Ok(SqliteLibraryStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CatalogStore for SqliteLibraryStore {
    fn create_entry(&self, entry: &NewCatalogEntry) -> LibraryResult<CatalogEntry> {
        validate_new_entry(entry)?;
        let key = CompoundKey {
            artist: entry.artist.clone(),
            title: entry.title.clone(),
            year: entry.year,
        };

        let mut conn = self.lock();
        let tx = conn.transaction()?;
        if find_active_entry(&tx, &key)?.is_some() {
            warn!("Attempted to create duplicate song {}", key);
            return Err(LibraryError::Conflict(format!("Song {} already exists", key)));
        }
        tx.execute(
            "INSERT INTO songs (artist, title, year, genre, duration) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.artist,
                entry.title,
                entry.year,
                entry.genre,
                entry.duration
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!("Created song {} with id {}", key, id);
        Ok(CatalogEntry {
            id,
            artist: entry.artist.clone(),
            title: entry.title.clone(),
            year: entry.year,
            genre: entry.genre.clone(),
            duration: entry.duration,
            play_count: 0,
        })
    }

    fn get_entry_by_id(&self, id: i64) -> LibraryResult<CatalogEntry> {
        let conn = self.lock();
        find_active_entry_by_id(&conn, id)?
            .ok_or_else(|| LibraryError::NotFound(format!("Song with id {} not found", id)))
    }

    fn get_entry_by_key(&self, key: &CompoundKey) -> LibraryResult<CatalogEntry> {
        validate_compound_key(key)?;
        let conn = self.lock();
        find_active_entry(&conn, key)?
            .ok_or_else(|| LibraryError::NotFound(format!("Song {} not found", key)))
    }

    fn get_all_entries(&self, sort_by_play_count: bool) -> LibraryResult<Vec<CatalogEntry>> {
        let order = if sort_by_play_count {
            "songs.play_count DESC, songs.id ASC"
        } else {
            "songs.id ASC"
        };
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM songs WHERE songs.deleted = 0 ORDER BY {}",
            ENTRY_COLUMNS, order
        ))?;
        let entries = stmt
            .query_map([], |row| entry_from_row(row, 0))?
            .collect::<Result<Vec<_>, _>>()?;
        if entries.is_empty() {
            warn!("The catalog is empty");
        }
        Ok(entries)
    }

    fn get_random_entry(&self) -> LibraryResult<CatalogEntry> {
        let conn = self.lock();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM songs WHERE deleted = 0", [], |r| {
                r.get(0)
            })?;
        if count == 0 {
            return Err(LibraryError::Empty("The catalog is empty".to_string()));
        }

        let offset = rand::rng().random_range(0..count);
        debug!("Random offset {} of {} songs", offset, count);
        let entry = conn.query_row(
            &format!(
                "SELECT {} FROM songs WHERE songs.deleted = 0 ORDER BY songs.id LIMIT 1 OFFSET ?1",
                ENTRY_COLUMNS
            ),
            params![offset],
            |row| entry_from_row(row, 0),
        )?;
        Ok(entry)
    }

    fn delete_entry(&self, id: i64) -> LibraryResult<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let deleted: Option<bool> = tx
            .query_row(
                "SELECT deleted FROM songs WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        match deleted {
            None => {
                return Err(LibraryError::NotFound(format!(
                    "Song with id {} not found",
                    id
                )))
            }
            Some(true) => {
                return Err(LibraryError::NotFound(format!(
                    "Song with id {} has already been deleted",
                    id
                )))
            }
            Some(false) => {}
        }

        tx.execute("UPDATE songs SET deleted = 1 WHERE id = ?1", params![id])?;
        if let Some(track_number) = track_number_of(&tx, id)? {
            remove_track(&tx, track_number)?;
            debug!("Removed deleted song {} from track {}", id, track_number);
        }
        tx.commit()?;

        info!("Song with id {} marked as deleted", id);
        Ok(())
    }

    fn increment_play_count(&self, id: i64) -> LibraryResult<CatalogEntry> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        if !bump_play_count(&tx, id)? {
            return Err(LibraryError::NotFound(format!(
                "Song with id {} not found",
                id
            )));
        }
        let entry = find_active_entry_by_id(&tx, id)?
            .ok_or_else(|| LibraryError::NotFound(format!("Song with id {} not found", id)))?;
        tx.commit()?;
        Ok(entry)
    }

    fn clear_catalog(&self) -> LibraryResult<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM playlist", [])?;
        let removed = tx.execute("DELETE FROM songs", [])?;
        write_cursor(&tx, 1)?;
        tx.commit()?;
        info!("Catalog cleared, {} songs removed", removed);
        Ok(())
    }

    fn check_health(&self) -> LibraryResult<()> {
        let conn = self.lock();
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        let tables: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('songs', 'playlist', 'playlist_cursor')",
            [],
            |row| row.get(0),
        )?;
        if tables != 3 {
            return Err(LibraryError::Internal(anyhow!(
                "Library database is missing tables, found {} of 3",
                tables
            )));
        }
        Ok(())
    }
}
