//! PlaylistStore trait definition.

use super::models::PlaylistEntry;
use crate::catalog_store::CompoundKey;
use crate::error::LibraryResult;

/// An ordered list of catalog songs with a playback cursor.
///
/// Songs are addressed either by their catalog compound key or by their track
/// number. Every mutation leaves the track numbers dense and 1-based.
pub trait PlaylistStore: Send + Sync {
    // =========================================================================
    // Editing
    // =========================================================================

    /// Appends an active catalog song at track N+1.
    fn append_song(&self, key: &CompoundKey) -> LibraryResult<PlaylistEntry>;

    fn remove_song_by_key(&self, key: &CompoundKey) -> LibraryResult<PlaylistEntry>;

    fn remove_song_by_track_number(&self, track_number: usize) -> LibraryResult<PlaylistEntry>;

    fn move_song_to_beginning(&self, key: &CompoundKey) -> LibraryResult<PlaylistEntry>;

    fn move_song_to_end(&self, key: &CompoundKey) -> LibraryResult<PlaylistEntry>;

    /// Relocates a song, shifting every song in between by one position.
    fn move_song_to_track_number(
        &self,
        key: &CompoundKey,
        track_number: usize,
    ) -> LibraryResult<PlaylistEntry>;

    /// Exchanges two positions. Swapping a position with itself does nothing.
    fn swap_songs(&self, track_number_1: usize, track_number_2: usize) -> LibraryResult<()>;

    fn clear_playlist(&self) -> LibraryResult<()>;

    // =========================================================================
    // Retrieval
    // =========================================================================

    fn get_song_by_track_number(&self, track_number: usize) -> LibraryResult<PlaylistEntry>;

    /// All songs ordered by track number.
    fn get_playlist(&self) -> LibraryResult<Vec<PlaylistEntry>>;

    fn playlist_length(&self) -> LibraryResult<usize>;

    fn playlist_total_duration(&self) -> LibraryResult<i64>;

    // =========================================================================
    // Playback
    // =========================================================================

    fn current_track_number(&self) -> LibraryResult<usize>;

    fn go_to_track_number(&self, track_number: usize) -> LibraryResult<()>;

    /// Returns the song under the cursor, bumps its play count and advances the
    /// cursor, wrapping from the last track to the first.
    fn play_current_song(&self) -> LibraryResult<PlaylistEntry>;

    fn rewind_playlist(&self) -> LibraryResult<()>;
}
