//! End-to-end tests for catalog endpoints
//!
//! Tests song creation, lookups, soft deletion, random picks and clearing.

mod common;

use common::{TestClient, TestServer, SONG_1, SONG_2, SONG_3, UNKNOWN_SONG};
use reqwest::StatusCode;
use serde_json::{json, Value};

// =============================================================================
// Health Tests
// =============================================================================

#[tokio::test]
async fn test_health_and_db_check() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.health().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    let response = client.db_check().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["database_status"], "healthy");
}

// =============================================================================
// Create / Read Tests
// =============================================================================

#[tokio::test]
async fn test_create_location_assigns_next_id() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.create_location(&UNKNOWN_SONG).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["song"]["id"], 4);
    assert_eq!(body["song"]["title"], UNKNOWN_SONG.title);
    assert_eq!(body["song"]["play_count"], 0);
}

#[tokio::test]
async fn test_create_duplicate_location_returns_409() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.create_location(&SONG_1).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_invalid_location_returns_400() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .create_location_raw(json!({
            "artist": "Someone",
            "title": "Something",
            "year": -3,
            "genre": "Pop",
            "duration": 100,
        }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("year"));

    let response = client
        .create_location_raw(json!({ "artist": "Someone" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_location_by_id_and_key() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_location_by_id(2).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["song"]["artist"], SONG_2.artist);

    let response = client.get_location_by_compound_key(&SONG_3).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["song"]["id"], 3);

    assert_eq!(
        client.get_location_by_id(99).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client
            .get_location_by_compound_key(&UNKNOWN_SONG)
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_get_all_locations() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let body: Value = client.get_all_locations(false).await.json().await.unwrap();
    let ids: Vec<i64> = body["songs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|song| song["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_get_all_locations_sorted_by_play_count() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client.add_song_to_playlist(&SONG_3).await;
    client.play_current_song().await;
    client.play_current_song().await;

    let body: Value = client.get_all_locations(true).await.json().await.unwrap();
    let songs = body["songs"].as_array().unwrap();
    assert_eq!(songs[0]["title"], SONG_3.title);
    assert_eq!(songs[0]["play_count"], 2);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[tokio::test]
async fn test_delete_location_is_soft_and_not_repeatable() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    assert_eq!(client.delete_location(1).await.status(), StatusCode::OK);
    assert_eq!(
        client.get_location_by_id(1).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client.delete_location(1).await.status(),
        StatusCode::NOT_FOUND
    );

    // The compound key is free again, ids keep increasing
    let body: Value = client.create_location(&SONG_1).await.json().await.unwrap();
    assert_eq!(body["song"]["id"], 4);
}

#[tokio::test]
async fn test_delete_location_removes_it_from_playlist() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client.add_song_to_playlist(&SONG_1).await;
    client.add_song_to_playlist(&SONG_2).await;
    client.add_song_to_playlist(&SONG_3).await;

    assert_eq!(client.delete_location(2).await.status(), StatusCode::OK);

    assert_eq!(
        client.playlist_titles().await,
        vec![SONG_1.title, SONG_3.title]
    );
    let body: Value = client
        .get_song_by_track_number(2)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["song"]["title"], SONG_3.title);
}

// =============================================================================
// Random / Clear Tests
// =============================================================================

#[tokio::test]
async fn test_random_location_skips_deleted_songs() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client.delete_location(1).await;
    client.delete_location(3).await;

    for _ in 0..5 {
        let body: Value = client.get_random_location().await.json().await.unwrap();
        assert_eq!(body["song"]["id"], 2);
    }

    client.delete_location(2).await;
    assert_eq!(
        client.get_random_location().await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_clear_catalog_resets_ids_and_playlist() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client.add_song_to_playlist(&SONG_1).await;
    assert_eq!(client.clear_catalog().await.status(), StatusCode::OK);

    let body: Value = client.get_all_locations(false).await.json().await.unwrap();
    assert!(body["songs"].as_array().unwrap().is_empty());
    assert!(client.playlist_titles().await.is_empty());

    let body: Value = client.create_location(&SONG_2).await.json().await.unwrap();
    assert_eq!(body["song"]["id"], 1);
}
