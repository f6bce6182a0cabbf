use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::put,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::CompletionRequest,
    repo_types::CompletionKey,
    services::{mark_completed, unmark_completed},
};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/meal-completions", put(mark).delete(unmark))
}

#[instrument(skip(state, body))]
pub async fn mark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let key = CompletionKey::new(body.meal_id, body.slot);
    mark_completed(&state, user_id, body.date, key).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body))]
pub async fn unmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let key = CompletionKey::new(body.meal_id, body.slot);
    unmark_completed(&state, user_id, body.date, key).await?;
    Ok(StatusCode::NO_CONTENT)
}
