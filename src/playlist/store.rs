use super::models::PlaylistEntry;
use super::trait_def::PlaylistStore;
use crate::catalog_store::{
    bump_play_count, entry_from_row, find_active_entry, validate_compound_key, CatalogEntry,
    CompoundKey, SqliteLibraryStore, ENTRY_COLUMNS,
};
use crate::error::{ensure_track_in_range, LibraryError, LibraryResult};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

const CURSOR_ROW_ID: i64 = 1;

fn playlist_len(conn: &Connection) -> rusqlite::Result<usize> {
    conn.query_row("SELECT COUNT(*) FROM playlist", [], |row| row.get(0))
}

pub(crate) fn track_number_of(conn: &Connection, song_id: i64) -> rusqlite::Result<Option<usize>> {
    conn.query_row(
        "SELECT track_number FROM playlist WHERE song_id = ?1",
        params![song_id],
        |row| row.get(0),
    )
    .optional()
}

fn entry_at(conn: &Connection, track_number: usize) -> rusqlite::Result<Option<PlaylistEntry>> {
    conn.query_row(
        &format!(
            "SELECT playlist.track_number, {} FROM playlist JOIN songs ON songs.id = playlist.song_id WHERE playlist.track_number = ?1",
            ENTRY_COLUMNS
        ),
        params![track_number],
        |row| {
            Ok(PlaylistEntry {
                track_number: row.get(0)?,
                song: entry_from_row(row, 1)?,
            })
        },
    )
    .optional()
}

/// Like [`entry_at`], for callers that already checked the range.
fn existing_entry_at(conn: &Connection, track_number: usize) -> LibraryResult<PlaylistEntry> {
    entry_at(conn, track_number)?.ok_or_else(|| {
        LibraryError::NotFound(format!("No song at track number {}", track_number))
    })
}

fn read_cursor(conn: &Connection) -> rusqlite::Result<usize> {
    let cursor: Option<usize> = conn
        .query_row(
            "SELECT current_track_number FROM playlist_cursor WHERE id = ?1",
            params![CURSOR_ROW_ID],
            |row| row.get(0),
        )
        .optional()?;
    Ok(cursor.unwrap_or(1))
}

pub(crate) fn write_cursor(conn: &Connection, track_number: usize) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO playlist_cursor (id, current_track_number) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET current_track_number = excluded.current_track_number",
        params![CURSOR_ROW_ID, track_number],
    )?;
    Ok(())
}

/// Deletes the song at `track_number` and closes the gap by moving every later
/// song up one position. The cursor goes back to 1 if it is left past the end.
pub(crate) fn remove_track(conn: &Connection, track_number: usize) -> rusqlite::Result<()> {
    conn.execute(
        "DELETE FROM playlist WHERE track_number = ?1",
        params![track_number],
    )?;
    conn.execute(
        "UPDATE playlist SET track_number = track_number - 1 WHERE track_number > ?1",
        params![track_number],
    )?;
    if read_cursor(conn)? > playlist_len(conn)? {
        write_cursor(conn, 1)?;
    }
    Ok(())
}

/// Moves the song with `song_id` from `from` to `to`, shifting the songs in
/// between by one position towards the vacated slot.
fn move_track(conn: &Connection, song_id: i64, from: usize, to: usize) -> rusqlite::Result<()> {
    if from == to {
        return Ok(());
    }
    if from < to {
        conn.execute(
            "UPDATE playlist SET track_number = track_number - 1 WHERE track_number > ?1 AND track_number <= ?2",
            params![from, to],
        )?;
    } else {
        conn.execute(
            "UPDATE playlist SET track_number = track_number + 1 WHERE track_number >= ?1 AND track_number < ?2",
            params![to, from],
        )?;
    }
    conn.execute(
        "UPDATE playlist SET track_number = ?1 WHERE song_id = ?2",
        params![to, song_id],
    )?;
    Ok(())
}

/// Finds a song of the playlist by key, returning it with its track number.
fn locate(conn: &Connection, key: &CompoundKey) -> LibraryResult<(CatalogEntry, usize)> {
    let not_in_playlist = || LibraryError::NotFound(format!("Song {} is not in the playlist", key));
    let entry = find_active_entry(conn, key)?.ok_or_else(not_in_playlist)?;
    let track_number = track_number_of(conn, entry.id)?.ok_or_else(not_in_playlist)?;
    Ok((entry, track_number))
}

enum MoveTarget {
    Beginning,
    End,
    TrackNumber(usize),
}

impl SqliteLibraryStore {
    fn move_song(&self, key: &CompoundKey, target: MoveTarget) -> LibraryResult<PlaylistEntry> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let (entry, from) = locate(&tx, key)?;
        let len = playlist_len(&tx)?;
        let to = match target {
            MoveTarget::Beginning => 1,
            MoveTarget::End => len,
            MoveTarget::TrackNumber(track_number) => {
                ensure_track_in_range(track_number, len)?;
                track_number
            }
        };
        move_track(&tx, entry.id, from, to)?;
        tx.commit()?;

        info!("Moved song {} from track {} to {}", key, from, to);
        Ok(PlaylistEntry {
            track_number: to,
            song: entry,
        })
    }
}

impl PlaylistStore for SqliteLibraryStore {
    fn append_song(&self, key: &CompoundKey) -> LibraryResult<PlaylistEntry> {
        validate_compound_key(key)?;
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let entry = find_active_entry(&tx, key)?.ok_or_else(|| {
            LibraryError::NotFound(format!("Song {} is not in the catalog", key))
        })?;
        if track_number_of(&tx, entry.id)?.is_some() {
            warn!("Song {} is already in the playlist", key);
            return Err(LibraryError::Conflict(format!(
                "Song {} is already in the playlist",
                key
            )));
        }
        let track_number = playlist_len(&tx)? + 1;
        tx.execute(
            "INSERT INTO playlist (song_id, track_number) VALUES (?1, ?2)",
            params![entry.id, track_number],
        )?;
        tx.commit()?;

        info!("Added song {} at track {}", key, track_number);
        Ok(PlaylistEntry {
            track_number,
            song: entry,
        })
    }

    fn remove_song_by_key(&self, key: &CompoundKey) -> LibraryResult<PlaylistEntry> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let (entry, track_number) = locate(&tx, key)?;
        remove_track(&tx, track_number)?;
        tx.commit()?;

        info!("Removed song {} from track {}", key, track_number);
        Ok(PlaylistEntry {
            track_number,
            song: entry,
        })
    }

    fn remove_song_by_track_number(&self, track_number: usize) -> LibraryResult<PlaylistEntry> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        ensure_track_in_range(track_number, playlist_len(&tx)?)?;
        let removed = existing_entry_at(&tx, track_number)?;
        remove_track(&tx, track_number)?;
        tx.commit()?;

        info!("Removed track {} ({})", track_number, removed.song.key());
        Ok(removed)
    }

    fn move_song_to_beginning(&self, key: &CompoundKey) -> LibraryResult<PlaylistEntry> {
        self.move_song(key, MoveTarget::Beginning)
    }

    fn move_song_to_end(&self, key: &CompoundKey) -> LibraryResult<PlaylistEntry> {
        self.move_song(key, MoveTarget::End)
    }

    fn move_song_to_track_number(
        &self,
        key: &CompoundKey,
        track_number: usize,
    ) -> LibraryResult<PlaylistEntry> {
        self.move_song(key, MoveTarget::TrackNumber(track_number))
    }

    fn swap_songs(&self, track_number_1: usize, track_number_2: usize) -> LibraryResult<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let len = playlist_len(&tx)?;
        ensure_track_in_range(track_number_1, len)?;
        ensure_track_in_range(track_number_2, len)?;
        if track_number_1 == track_number_2 {
            debug!("Swap of track {} with itself ignored", track_number_1);
            return Ok(());
        }

        let first = existing_entry_at(&tx, track_number_1)?;
        let second = existing_entry_at(&tx, track_number_2)?;
        tx.execute(
            "UPDATE playlist SET track_number = ?1 WHERE song_id = ?2",
            params![track_number_2, first.song.id],
        )?;
        tx.execute(
            "UPDATE playlist SET track_number = ?1 WHERE song_id = ?2",
            params![track_number_1, second.song.id],
        )?;
        tx.commit()?;

        info!("Swapped tracks {} and {}", track_number_1, track_number_2);
        Ok(())
    }

    fn clear_playlist(&self) -> LibraryResult<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM playlist", [])?;
        write_cursor(&tx, 1)?;
        tx.commit()?;

        if removed == 0 {
            warn!("Cleared an empty playlist");
        } else {
            info!("Playlist cleared, {} songs removed", removed);
        }
        Ok(())
    }

    fn get_song_by_track_number(&self, track_number: usize) -> LibraryResult<PlaylistEntry> {
        let conn = self.lock();
        ensure_track_in_range(track_number, playlist_len(&conn)?)?;
        existing_entry_at(&conn, track_number)
    }

    fn get_playlist(&self) -> LibraryResult<Vec<PlaylistEntry>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT playlist.track_number, {} FROM playlist JOIN songs ON songs.id = playlist.song_id ORDER BY playlist.track_number",
            ENTRY_COLUMNS
        ))?;
        let entries = stmt
            .query_map([], |row| {
                Ok(PlaylistEntry {
                    track_number: row.get(0)?,
                    song: entry_from_row(row, 1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn playlist_length(&self) -> LibraryResult<usize> {
        Ok(playlist_len(&self.lock())?)
    }

    fn playlist_total_duration(&self) -> LibraryResult<i64> {
        let conn = self.lock();
        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(songs.duration), 0) FROM playlist JOIN songs ON songs.id = playlist.song_id",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn current_track_number(&self) -> LibraryResult<usize> {
        Ok(read_cursor(&self.lock())?)
    }

    fn go_to_track_number(&self, track_number: usize) -> LibraryResult<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        ensure_track_in_range(track_number, playlist_len(&tx)?)?;
        write_cursor(&tx, track_number)?;
        tx.commit()?;
        debug!("Cursor set to track {}", track_number);
        Ok(())
    }

    fn play_current_song(&self) -> LibraryResult<PlaylistEntry> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let len = playlist_len(&tx)?;
        if len == 0 {
            return Err(LibraryError::Empty("The playlist is empty".to_string()));
        }

        let mut current = read_cursor(&tx)?;
        if current > len {
            current = 1;
        }
        let mut playing = existing_entry_at(&tx, current)?;
        if !bump_play_count(&tx, playing.song.id)? {
            return Err(LibraryError::NotFound(format!(
                "Song with id {} not found",
                playing.song.id
            )));
        }
        playing.song.play_count += 1;
        let next = if current == len { 1 } else { current + 1 };
        write_cursor(&tx, next)?;
        tx.commit()?;

        info!(
            "Playing track {}: {} (next is {})",
            current,
            playing.song.key(),
            next
        );
        Ok(playing)
    }

    fn rewind_playlist(&self) -> LibraryResult<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        if playlist_len(&tx)? == 0 {
            return Err(LibraryError::Empty("The playlist is empty".to_string()));
        }
        write_cursor(&tx, 1)?;
        tx.commit()?;
        Ok(())
    }
}
