//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all playlist-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

fn key_body(song: &TestSong) -> Value {
    json!({
        "artist": song.artist,
        "title": song.title,
        "year": song.year,
    })
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Response {
        let request = self.client.post(self.url(path));
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };
        request.send().await.expect("Request failed")
    }

    async fn delete(&self, path: &str, body: Option<Value>) -> Response {
        let request = self.client.delete(self.url(path));
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };
        request.send().await.expect("Request failed")
    }

    // ========================================================================
    // Health Endpoints
    // ========================================================================

    pub async fn health(&self) -> Response {
        self.get("/health").await
    }

    pub async fn db_check(&self) -> Response {
        self.get("/db-check").await
    }

    // ========================================================================
    // Account Endpoints
    // ========================================================================

    pub async fn create_account(&self, username: &str, password: &str) -> Response {
        self.post(
            "/create-account",
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.post(
            "/login",
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn update_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Response {
        self.post(
            "/update-password",
            Some(json!({
                "username": username,
                "old_password": old_password,
                "new_password": new_password,
            })),
        )
        .await
    }

    // ========================================================================
    // Catalog Endpoints
    // ========================================================================

    pub async fn create_location(&self, song: &TestSong) -> Response {
        self.post(
            "/create-location",
            Some(json!({
                "artist": song.artist,
                "title": song.title,
                "year": song.year,
                "genre": song.genre,
                "duration": song.duration,
            })),
        )
        .await
    }

    pub async fn create_location_raw(&self, body: Value) -> Response {
        self.post("/create-location", Some(body)).await
    }

    pub async fn delete_location(&self, id: i64) -> Response {
        self.delete(&format!("/delete-location/{}", id), None).await
    }

    pub async fn get_all_locations(&self, sort_by_play_count: bool) -> Response {
        self.get(&format!(
            "/get-all-locations-from-catalog?sort_by_play_count={}",
            sort_by_play_count
        ))
        .await
    }

    pub async fn get_location_by_id(&self, id: i64) -> Response {
        self.get(&format!("/get-location-from-catalog-by-id/{}", id))
            .await
    }

    pub async fn get_location_by_compound_key(&self, song: &TestSong) -> Response {
        self.client
            .get(self.url("/get-location-from-catalog-by-compound-key"))
            .query(&[
                ("artist", song.artist.to_string()),
                ("title", song.title.to_string()),
                ("year", song.year.to_string()),
            ])
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_random_location(&self) -> Response {
        self.get("/get-random-location").await
    }

    pub async fn clear_catalog(&self) -> Response {
        self.delete("/clear-catalog", None).await
    }

    // ========================================================================
    // Playlist Endpoints
    // ========================================================================

    pub async fn add_song_to_playlist(&self, song: &TestSong) -> Response {
        self.post("/add-song-to-playlist", Some(key_body(song)))
            .await
    }

    pub async fn remove_song_from_playlist(&self, song: &TestSong) -> Response {
        self.delete("/remove-song-from-playlist", Some(key_body(song)))
            .await
    }

    pub async fn remove_song_by_track_number(&self, track_number: usize) -> Response {
        self.delete(
            &format!(
                "/remove-song-from-playlist-by-track-number/{}",
                track_number
            ),
            None,
        )
        .await
    }

    pub async fn clear_playlist(&self) -> Response {
        self.post("/clear-playlist", None).await
    }

    pub async fn get_all_songs_from_playlist(&self) -> Response {
        self.get("/get-all-songs-from-playlist").await
    }

    pub async fn get_song_by_track_number(&self, track_number: usize) -> Response {
        self.get(&format!(
            "/get-song-from-playlist-by-track-number/{}",
            track_number
        ))
        .await
    }

    pub async fn get_playlist_length_duration(&self) -> Response {
        self.get("/get-playlist-length-duration").await
    }

    pub async fn move_song_to_beginning(&self, song: &TestSong) -> Response {
        self.post("/move-song-to-beginning", Some(key_body(song)))
            .await
    }

    pub async fn move_song_to_end(&self, song: &TestSong) -> Response {
        self.post("/move-song-to-end", Some(key_body(song))).await
    }

    pub async fn move_song_to_track_number(&self, song: &TestSong, track_number: usize) -> Response {
        let mut body = key_body(song);
        body["track_number"] = json!(track_number);
        self.post("/move-song-to-track-number", Some(body)).await
    }

    pub async fn swap_songs(&self, track_number_1: usize, track_number_2: usize) -> Response {
        self.post(
            "/swap-songs-in-playlist",
            Some(json!({
                "track_number_1": track_number_1,
                "track_number_2": track_number_2,
            })),
        )
        .await
    }

    pub async fn go_to_track_number(&self, track_number: usize) -> Response {
        self.post(
            "/go-to-track-number",
            Some(json!({ "track_number": track_number })),
        )
        .await
    }

    pub async fn play_current_song(&self) -> Response {
        self.post("/play-current-song", None).await
    }

    pub async fn rewind_playlist(&self) -> Response {
        self.post("/rewind-playlist", None).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Titles of the playlist songs, track 1 first.
    pub async fn playlist_titles(&self) -> Vec<String> {
        let body: Value = self
            .get_all_songs_from_playlist()
            .await
            .json()
            .await
            .expect("Invalid playlist body");
        body["songs"]
            .as_array()
            .expect("Missing songs array")
            .iter()
            .map(|song| song["title"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}
