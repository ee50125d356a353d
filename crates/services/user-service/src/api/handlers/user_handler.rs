//! User handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use uuid::Uuid;

use common::AppResult;
use domain::{RegistrationRequest, UserSummary, MSG_REGISTRATION_SUCCESSFUL};

use crate::api::extractors::AppJson;
use crate::api::state::AppState;

/// Body returned after a successful registration
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub id: Uuid,
    pub message: &'static str,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(list_users).post(register))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegistrationRequest>,
) -> AppResult<Response> {
    let user = state.user_service.register(payload).await?;

    let location = format!("/api/users?id={}", user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(RegistrationResponse {
            id: user.id,
            message: MSG_REGISTRATION_SUCCESSFUL,
        }),
    )
        .into_response())
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}
