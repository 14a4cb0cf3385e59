//! Error type shared by the library stores and the account manager.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Track number {track_number} is out of range, playlist has {len} songs")]
    OutOfRange { track_number: usize, len: usize },

    #[error("{0}")]
    Empty(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Connection(#[from] rusqlite::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type LibraryResult<T> = Result<T, LibraryError>;

/// Fails with [`LibraryError::OutOfRange`] unless `track_number` is in `1..=len`.
pub fn ensure_track_in_range(track_number: usize, len: usize) -> LibraryResult<()> {
    if track_number == 0 || track_number > len {
        return Err(LibraryError::OutOfRange { track_number, len });
    }
    Ok(())
}
