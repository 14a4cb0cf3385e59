use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::extract::{Validate, ValidatedJson};
use super::responses::{success_response, success_response_with_status};
use super::state::{GuardedUserManager, ServerState};
use crate::catalog_store::validate_non_empty;
use crate::error::LibraryResult;

#[derive(Deserialize)]
struct CredentialsBody {
    username: String,
    password: String,
}

impl Validate for CredentialsBody {
    fn validate(&self) -> LibraryResult<()> {
        validate_non_empty("username", &self.username)?;
        validate_non_empty("password", &self.password)?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct UpdatePasswordBody {
    username: String,
    old_password: String,
    new_password: String,
}

impl Validate for UpdatePasswordBody {
    fn validate(&self) -> LibraryResult<()> {
        validate_non_empty("username", &self.username)?;
        validate_non_empty("old_password", &self.old_password)?;
        validate_non_empty("new_password", &self.new_password)?;
        Ok(())
    }
}

async fn create_account(
    State(user_manager): State<GuardedUserManager>,
    ValidatedJson(body): ValidatedJson<CredentialsBody>,
) -> Response {
    match user_manager.create_account(&body.username, &body.password) {
        Ok(_) => success_response_with_status(
            StatusCode::CREATED,
            json!({ "username": body.username }),
        ),
        Err(err) => err.into_response(),
    }
}

async fn login(
    State(user_manager): State<GuardedUserManager>,
    ValidatedJson(body): ValidatedJson<CredentialsBody>,
) -> Response {
    debug!("login() called for {}", body.username);
    match user_manager.login(&body.username, &body.password) {
        Ok(_) => success_response(json!({ "username": body.username })),
        Err(err) => err.into_response(),
    }
}

async fn update_password(
    State(user_manager): State<GuardedUserManager>,
    ValidatedJson(body): ValidatedJson<UpdatePasswordBody>,
) -> Response {
    match user_manager.update_password(&body.username, &body.old_password, &body.new_password) {
        Ok(()) => success_response(json!({ "message": "Password updated" })),
        Err(err) => err.into_response(),
    }
}

pub fn account_routes() -> Router<ServerState> {
    Router::new()
        .route("/create-account", post(create_account))
        .route("/login", post(login))
        .route("/update-password", post(update_password))
}
