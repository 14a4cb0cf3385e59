use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration, time::Instant};

use tracing::{error, info};

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::account_routes::account_routes;
use super::catalog_routes::catalog_routes;
use super::playlist_routes::playlist_routes;
use super::{log_requests, state::*, ServerConfig};
use crate::user::{UserManager, UserStore};

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn health(State(state): State<ServerState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "uptime": format_uptime(state.start_time.elapsed()),
    }))
}

async fn db_check(State(catalog): State<GuardedCatalogStore>) -> Response {
    match catalog.check_health() {
        Ok(()) => Json(json!({ "database_status": "healthy" })).into_response(),
        Err(err) => {
            error!("Database health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "database_status": "unhealthy",
                    "error": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    catalog_store: GuardedCatalogStore,
    playlist_store: GuardedPlaylistStore,
    user_store: Arc<dyn UserStore>,
) -> Result<Router> {
    let state = ServerState {
        config,
        start_time: Instant::now(),
        catalog_store,
        playlist_store,
        user_manager: Arc::new(UserManager::new(user_store)),
    };

    let api_routes: Router = Router::new()
        .route("/health", get(health))
        .route("/db-check", get(db_check))
        .merge(account_routes())
        .merge(catalog_routes())
        .merge(playlist_routes())
        .with_state(state.clone());

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

pub async fn run_server(
    config: ServerConfig,
    catalog_store: GuardedCatalogStore,
    playlist_store: GuardedPlaylistStore,
    user_store: Arc<dyn UserStore>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, catalog_store, playlist_store, user_store)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on {}", listener.local_addr()?);

    Ok(axum::serve(listener, app).await?)
}
