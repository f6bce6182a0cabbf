use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use super::{dto::MealQuery, repo_types::Meal};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/meals", get(list_meals))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(q): Query<MealQuery>,
) -> Result<Json<Vec<Meal>>, ApiError> {
    let meals = state.meals.list_meals(q.slot).await.map_err(|e| {
        error!(error = %e, "list meals failed");
        ApiError::DataUnavailable("meal catalog unavailable")
    })?;
    Ok(Json(meals))
}
