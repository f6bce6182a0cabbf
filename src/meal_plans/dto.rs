use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::repo_types::PlanWithMeals;
use crate::{
    dates::date_format,
    meals::{dto::MealDetails, MealSlot},
};

#[derive(Debug, Default, Deserialize)]
pub struct GeneratePlanRequest {
    /// Defaults to today (UTC).
    #[serde(default, deserialize_with = "date_format::option::deserialize")]
    pub date: Option<Date>,
    #[serde(default)]
    pub regenerate: bool,
}

#[derive(Debug, Serialize)]
pub struct PlanView {
    pub id: Uuid,
    #[serde(with = "date_format")]
    pub date: Date,
    pub breakfast_meal: Option<MealDetails>,
    pub lunch_meal: Option<MealDetails>,
    pub snack_meal: Option<MealDetails>,
    pub dinner_meal: Option<MealDetails>,
}

impl From<PlanWithMeals> for PlanView {
    fn from(p: PlanWithMeals) -> Self {
        Self {
            id: p.plan.id,
            date: p.plan.date,
            breakfast_meal: p.breakfast.map(MealDetails::from),
            lunch_meal: p.lunch.map(MealDetails::from),
            snack_meal: p.snack.map(MealDetails::from),
            dinner_meal: p.dinner.map(MealDetails::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: PlanView,
}

#[derive(Debug, Serialize)]
pub struct ProgressItem {
    pub slot: MealSlot,
    pub meal: MealDetails,
    pub completed: bool,
}

/// One day's plan with done markers and calorie totals.
#[derive(Debug, Serialize)]
pub struct DailyProgress {
    #[serde(with = "date_format")]
    pub date: Date,
    pub meals: Vec<ProgressItem>,
    pub total_calories: i64,
    pub consumed_calories: i64,
}
