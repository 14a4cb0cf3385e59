use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::extract::{PathParam, Validate, ValidatedJson, ValidatedQuery};
use super::responses::{success_response, success_response_with_status};
use super::state::{GuardedCatalogStore, ServerState};
use crate::catalog_store::{validate_compound_key, validate_new_entry, CompoundKey, NewCatalogEntry};
use crate::error::LibraryResult;

impl Validate for NewCatalogEntry {
    fn validate(&self) -> LibraryResult<()> {
        Ok(validate_new_entry(self)?)
    }
}

impl Validate for CompoundKey {
    fn validate(&self) -> LibraryResult<()> {
        Ok(validate_compound_key(self)?)
    }
}

#[derive(Deserialize, Debug, Default)]
struct SortQuery {
    #[serde(default)]
    sort_by_play_count: bool,
}

impl Validate for SortQuery {
    fn validate(&self) -> LibraryResult<()> {
        Ok(())
    }
}

async fn create_location(
    State(catalog): State<GuardedCatalogStore>,
    ValidatedJson(body): ValidatedJson<NewCatalogEntry>,
) -> Response {
    match catalog.create_entry(&body) {
        Ok(song) => success_response_with_status(StatusCode::CREATED, json!({ "song": song })),
        Err(err) => err.into_response(),
    }
}

async fn delete_location(
    State(catalog): State<GuardedCatalogStore>,
    PathParam(id): PathParam<i64>,
) -> Response {
    match catalog.delete_entry(id) {
        Ok(()) => success_response(json!({
            "message": format!("Song with id {} deleted", id)
        })),
        Err(err) => err.into_response(),
    }
}

async fn get_all_locations(
    State(catalog): State<GuardedCatalogStore>,
    ValidatedQuery(query): ValidatedQuery<SortQuery>,
) -> Response {
    match catalog.get_all_entries(query.sort_by_play_count) {
        Ok(songs) => success_response(json!({ "songs": songs })),
        Err(err) => err.into_response(),
    }
}

async fn get_location_by_id(
    State(catalog): State<GuardedCatalogStore>,
    PathParam(id): PathParam<i64>,
) -> Response {
    match catalog.get_entry_by_id(id) {
        Ok(song) => success_response(json!({ "song": song })),
        Err(err) => err.into_response(),
    }
}

async fn get_location_by_compound_key(
    State(catalog): State<GuardedCatalogStore>,
    ValidatedQuery(key): ValidatedQuery<CompoundKey>,
) -> Response {
    debug!("Looking up song {}", key);
    match catalog.get_entry_by_key(&key) {
        Ok(song) => success_response(json!({ "song": song })),
        Err(err) => err.into_response(),
    }
}

async fn get_random_location(State(catalog): State<GuardedCatalogStore>) -> Response {
    match catalog.get_random_entry() {
        Ok(song) => success_response(json!({ "song": song })),
        Err(err) => err.into_response(),
    }
}

async fn clear_catalog(State(catalog): State<GuardedCatalogStore>) -> Response {
    match catalog.clear_catalog() {
        Ok(()) => success_response(json!({ "message": "Catalog cleared" })),
        Err(err) => err.into_response(),
    }
}

pub fn catalog_routes() -> Router<ServerState> {
    Router::new()
        .route("/create-location", post(create_location))
        .route("/delete-location/{id}", delete(delete_location))
        .route("/get-all-locations-from-catalog", get(get_all_locations))
        .route(
            "/get-location-from-catalog-by-id/{id}",
            get(get_location_by_id),
        )
        .route(
            "/get-location-from-catalog-by-compound-key",
            get(get_location_by_compound_key),
        )
        .route("/get-random-location", get(get_random_location))
        .route("/clear-catalog", delete(clear_catalog))
}
