use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::extract::{PathParam, Validate, ValidatedJson};
use super::responses::{success_response, success_response_with_status};
use super::state::{GuardedPlaylistStore, ServerState};
use crate::catalog_store::{validate_compound_key, CompoundKey};
use crate::error::LibraryResult;
use crate::playlist::PlaylistEntry;

#[derive(Deserialize, Debug)]
struct MoveToTrackNumberBody {
    artist: String,
    title: String,
    year: i64,
    track_number: usize,
}

impl MoveToTrackNumberBody {
    fn key(&self) -> CompoundKey {
        CompoundKey {
            artist: self.artist.clone(),
            title: self.title.clone(),
            year: self.year,
        }
    }
}

impl Validate for MoveToTrackNumberBody {
    fn validate(&self) -> LibraryResult<()> {
        Ok(validate_compound_key(&self.key())?)
    }
}

#[derive(Deserialize, Debug)]
struct SwapBody {
    track_number_1: usize,
    track_number_2: usize,
}

impl Validate for SwapBody {
    fn validate(&self) -> LibraryResult<()> {
        Ok(())
    }
}

#[derive(Deserialize, Debug)]
struct TrackNumberBody {
    track_number: usize,
}

impl Validate for TrackNumberBody {
    fn validate(&self) -> LibraryResult<()> {
        Ok(())
    }
}

fn song_response(result: LibraryResult<PlaylistEntry>) -> Response {
    match result {
        Ok(song) => success_response(json!({ "song": song })),
        Err(err) => err.into_response(),
    }
}

async fn add_song_to_playlist(
    State(playlist): State<GuardedPlaylistStore>,
    ValidatedJson(key): ValidatedJson<CompoundKey>,
) -> Response {
    match playlist.append_song(&key) {
        Ok(song) => success_response_with_status(StatusCode::CREATED, json!({ "song": song })),
        Err(err) => err.into_response(),
    }
}

async fn remove_song_from_playlist(
    State(playlist): State<GuardedPlaylistStore>,
    ValidatedJson(key): ValidatedJson<CompoundKey>,
) -> Response {
    song_response(playlist.remove_song_by_key(&key))
}

async fn remove_song_by_track_number(
    State(playlist): State<GuardedPlaylistStore>,
    PathParam(track_number): PathParam<usize>,
) -> Response {
    song_response(playlist.remove_song_by_track_number(track_number))
}

async fn clear_playlist(State(playlist): State<GuardedPlaylistStore>) -> Response {
    match playlist.clear_playlist() {
        Ok(()) => success_response(json!({ "message": "Playlist cleared" })),
        Err(err) => err.into_response(),
    }
}

async fn get_all_songs(State(playlist): State<GuardedPlaylistStore>) -> Response {
    match playlist.get_playlist() {
        Ok(songs) => success_response(json!({ "songs": songs })),
        Err(err) => err.into_response(),
    }
}

async fn get_song_by_track_number(
    State(playlist): State<GuardedPlaylistStore>,
    PathParam(track_number): PathParam<usize>,
) -> Response {
    song_response(playlist.get_song_by_track_number(track_number))
}

async fn get_length_duration(State(playlist): State<GuardedPlaylistStore>) -> Response {
    let summary = playlist
        .playlist_length()
        .and_then(|length| Ok((length, playlist.playlist_total_duration()?)));
    match summary {
        Ok((length, duration)) => success_response(json!({
            "playlist_length": length,
            "playlist_duration": duration,
        })),
        Err(err) => err.into_response(),
    }
}

async fn move_song_to_beginning(
    State(playlist): State<GuardedPlaylistStore>,
    ValidatedJson(key): ValidatedJson<CompoundKey>,
) -> Response {
    song_response(playlist.move_song_to_beginning(&key))
}

async fn move_song_to_end(
    State(playlist): State<GuardedPlaylistStore>,
    ValidatedJson(key): ValidatedJson<CompoundKey>,
) -> Response {
    song_response(playlist.move_song_to_end(&key))
}

async fn move_song_to_track_number(
    State(playlist): State<GuardedPlaylistStore>,
    ValidatedJson(body): ValidatedJson<MoveToTrackNumberBody>,
) -> Response {
    song_response(playlist.move_song_to_track_number(&body.key(), body.track_number))
}

async fn swap_songs(
    State(playlist): State<GuardedPlaylistStore>,
    ValidatedJson(body): ValidatedJson<SwapBody>,
) -> Response {
    match playlist.swap_songs(body.track_number_1, body.track_number_2) {
        Ok(()) => success_response(json!({
            "message": format!(
                "Swapped tracks {} and {}",
                body.track_number_1, body.track_number_2
            )
        })),
        Err(err) => err.into_response(),
    }
}

async fn go_to_track_number(
    State(playlist): State<GuardedPlaylistStore>,
    ValidatedJson(body): ValidatedJson<TrackNumberBody>,
) -> Response {
    match playlist.go_to_track_number(body.track_number) {
        Ok(()) => success_response(json!({ "current_track_number": body.track_number })),
        Err(err) => err.into_response(),
    }
}

async fn play_current_song(State(playlist): State<GuardedPlaylistStore>) -> Response {
    song_response(playlist.play_current_song())
}

async fn rewind_playlist(State(playlist): State<GuardedPlaylistStore>) -> Response {
    match playlist.rewind_playlist() {
        Ok(()) => success_response(json!({ "current_track_number": 1 })),
        Err(err) => err.into_response(),
    }
}

pub fn playlist_routes() -> Router<ServerState> {
    Router::new()
        .route("/add-song-to-playlist", post(add_song_to_playlist))
        .route("/remove-song-from-playlist", delete(remove_song_from_playlist))
        .route(
            "/remove-song-from-playlist-by-track-number/{track_number}",
            delete(remove_song_by_track_number),
        )
        .route("/clear-playlist", post(clear_playlist))
        .route("/get-all-songs-from-playlist", get(get_all_songs))
        .route(
            "/get-song-from-playlist-by-track-number/{track_number}",
            get(get_song_by_track_number),
        )
        .route("/get-playlist-length-duration", get(get_length_duration))
        .route("/move-song-to-beginning", post(move_song_to_beginning))
        .route("/move-song-to-end", post(move_song_to_end))
        .route("/move-song-to-track-number", post(move_song_to_track_number))
        .route("/swap-songs-in-playlist", post(swap_songs))
        .route("/go-to-track-number", post(go_to_track_number))
        .route("/play-current-song", post(play_current_song))
        .route("/rewind-playlist", post(rewind_playlist))
}
