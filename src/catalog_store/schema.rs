//! Schema of the library database: the song catalog, the playlist built from it
//! and the playlist playback cursor.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};
use rusqlite::Connection;

/// V 0
pub const SONGS_TABLE_V_0: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("artist", &SqlType::Text, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("genre", &SqlType::Text, non_null = true),
        sqlite_column!("duration", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "deleted",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_songs_compound_key", "artist, title, year")],
    unique_constraints: &[],
};

const SONG_FOREIGN_KEY: ForeignKey = ForeignKey {
    foreign_table: "songs",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

pub const PLAYLIST_TABLE_V_0: Table = Table {
    name: "playlist",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "song_id",
            &SqlType::Integer,
            non_null = true,
            is_unique = true,
            foreign_key = Some(&SONG_FOREIGN_KEY)
        ),
        // Not unique: renumbering shifts whole ranges with a single UPDATE.
        sqlite_column!("track_number", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_playlist_track_number", "track_number")],
    unique_constraints: &[],
};

/// V 1
pub const SONGS_TABLE_V_1: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("artist", &SqlType::Text, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("genre", &SqlType::Text, non_null = true),
        sqlite_column!("duration", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "deleted",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!(
            "play_count",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
    ],
    indices: &[("idx_songs_compound_key", "artist, title, year")],
    unique_constraints: &[],
};

pub const PLAYLIST_CURSOR_TABLE_V_1: Table = Table {
    name: "playlist_cursor",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "current_track_number",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        ),
    ],
    indices: &[],
    unique_constraints: &[],
};

pub const LIBRARY_VERSIONED_SCHEMAS: &[VersionedSchema] = &[
    VersionedSchema {
        version: 0,
        tables: &[SONGS_TABLE_V_0, PLAYLIST_TABLE_V_0],
        migration: None,
    },
    VersionedSchema {
        version: 1,
        tables: &[SONGS_TABLE_V_1, PLAYLIST_TABLE_V_0, PLAYLIST_CURSOR_TABLE_V_1],
        migration: Some(|conn: &Connection| {
            conn.execute(
                "ALTER TABLE songs ADD COLUMN play_count INTEGER NOT NULL DEFAULT 0",
                [],
            )?;
            PLAYLIST_CURSOR_TABLE_V_1.create(conn)?;
            Ok(())
        }),
    },
];
