use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use time::Date;
use tracing::{info, instrument};

use super::{
    dto::{DailyProgress, GeneratePlanRequest, PlanResponse},
    services::{daily_progress, load_plan, rotator},
};
use crate::{
    auth::AuthUser,
    dates::{parse_date, today_utc},
    error::ApiError,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans/:date", get(get_plan))
        .route("/meal-plans/:date/progress", get(get_progress))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/meal-plans/generate", post(generate_plan))
}

fn path_date(raw: &str) -> Result<Date, ApiError> {
    parse_date(raw).map_err(|_| ApiError::BadRequest(format!("invalid date: {raw}")))
}

/// POST /meal-plans/generate { date?: "YYYY-MM-DD", regenerate?: bool }
#[instrument(skip(state, body))]
pub async fn generate_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<GeneratePlanRequest>, JsonRejection>,
) -> Result<Json<PlanResponse>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let date = req.date.unwrap_or_else(today_utc);
    info!(%user_id, %date, regenerate = req.regenerate, "generating meal plan");

    let plan = rotator(&state)
        .generate_plan(user_id, date, req.regenerate)
        .await?;
    Ok(Json(PlanResponse { plan: plan.into() }))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<PlanResponse>, ApiError> {
    let date = path_date(&date)?;
    let plan = load_plan(&state, user_id, date).await?;
    Ok(Json(PlanResponse { plan: plan.into() }))
}

#[instrument(skip(state))]
pub async fn get_progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<DailyProgress>, ApiError> {
    let date = path_date(&date)?;
    Ok(Json(daily_progress(&state, user_id, date).await?))
}
