use time::Date;
use tracing::{error, instrument};
use uuid::Uuid;

use super::{
    dto::{DailyProgress, ProgressItem},
    repo_types::PlanWithMeals,
    rotator::MealPlanRotator,
};
use crate::{
    completions::CompletionKey,
    error::ApiError,
    meals::{dto::MealDetails, Meal, MealSlot},
    state::AppState,
};

pub fn rotator(state: &AppState) -> MealPlanRotator<'_> {
    MealPlanRotator {
        catalog: state.meals.as_ref(),
        plans: state.plans.as_ref(),
        random: state.random.as_ref(),
        lookback_days: state.config.meal_plan.lookback_days,
    }
}

async fn read_catalog(state: &AppState) -> Result<Vec<Meal>, ApiError> {
    state.meals.list_meals(None).await.map_err(|e| {
        error!(error = %e, "meal catalog read failed");
        ApiError::DataUnavailable("meal catalog unavailable")
    })
}

async fn find_joined(
    state: &AppState,
    user_id: Uuid,
    date: Date,
) -> Result<Option<PlanWithMeals>, ApiError> {
    let plan = state.plans.find_plan(user_id, date).await.map_err(|e| {
        error!(error = %e, "plan lookup failed");
        ApiError::DataUnavailable("failed to read meal plans")
    })?;
    match plan {
        Some(plan) => {
            let catalog = read_catalog(state).await?;
            Ok(Some(PlanWithMeals::join(plan, &catalog)))
        }
        None => Ok(None),
    }
}

/// Stored plan for the day, never generating one.
#[instrument(skip(state))]
pub async fn load_plan(
    state: &AppState,
    user_id: Uuid,
    date: Date,
) -> Result<PlanWithMeals, ApiError> {
    find_joined(state, user_id, date)
        .await?
        .ok_or(ApiError::NotFound("no meal plan for this date"))
}

#[instrument(skip(state))]
pub async fn daily_progress(
    state: &AppState,
    user_id: Uuid,
    date: Date,
) -> Result<DailyProgress, ApiError> {
    let joined = find_joined(state, user_id, date).await?;
    let done = state
        .completions
        .list_for_day(user_id, date)
        .await
        .map_err(|e| {
            error!(error = %e, "completion lookup failed");
            ApiError::DataUnavailable("failed to read meal completions")
        })?;
    Ok(progress(date, joined.as_ref(), &done))
}

pub fn progress(date: Date, plan: Option<&PlanWithMeals>, done: &[CompletionKey]) -> DailyProgress {
    let mut meals = Vec::new();
    let mut total_calories = 0;
    let mut consumed_calories = 0;

    if let Some(plan) = plan {
        for slot in MealSlot::ALL {
            let Some(meal) = plan.meal(slot) else {
                continue;
            };
            let completed = done.contains(&CompletionKey::new(meal.id, slot));
            let calories = i64::from(meal.calories.unwrap_or(0));
            total_calories += calories;
            if completed {
                consumed_calories += calories;
            }
            meals.push(ProgressItem {
                slot,
                meal: MealDetails::from(meal.clone()),
                completed,
            });
        }
    }

    DailyProgress {
        date,
        meals,
        total_calories,
        consumed_calories,
    }
}
