//! Daily meal-plan generation with anti-repetition.
//!
//! Each slot is filled independently: meals used by the same user in the
//! lookback window before the target date are excluded, and only when that
//! leaves nothing does the slot fall back to the whole slot-type.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use time::{Date, Duration};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::{
    repo::PlanStore,
    repo_types::{PlanSlots, PlanWithMeals},
};
use crate::{
    error::ApiError,
    meals::{Meal, MealCatalog, MealSlot},
};

/// Uniform choice among candidates.
pub trait RandomSource: Send + Sync {
    fn pick<'a>(&self, candidates: &[&'a Meal]) -> Option<&'a Meal>;
}

/// `rand::thread_rng` backed source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick<'a>(&self, candidates: &[&'a Meal]) -> Option<&'a Meal> {
        candidates.choose(&mut rand::thread_rng()).copied()
    }
}

/// Inclusive `[target - days, target - 1]`; `None` when `days` is zero.
/// A window reaching past the earliest representable date starts there.
pub fn lookback_window(target: Date, days: i64) -> Option<(Date, Date)> {
    if days <= 0 {
        return None;
    }
    let to = target.previous_day()?;
    let from = target
        .checked_sub(Duration::days(days.min(i64::from(i32::MAX))))
        .unwrap_or(Date::MIN);
    Some((from, to))
}

/// Chooses one meal id per slot.
pub fn select_slots(
    catalog: &[Meal],
    recently_used: &HashSet<Uuid>,
    random: &dyn RandomSource,
) -> PlanSlots {
    let mut slots = PlanSlots::default();
    for slot in MealSlot::ALL {
        let all: Vec<&Meal> = catalog.iter().filter(|m| m.slot == slot).collect();
        let fresh: Vec<&Meal> = all
            .iter()
            .copied()
            .filter(|m| !recently_used.contains(&m.id))
            .collect();
        let pool = if fresh.is_empty() { &all } else { &fresh };
        if fresh.is_empty() && !all.is_empty() {
            debug!(%slot, "every meal used recently; repeating");
        }
        slots.set(slot, random.pick(pool).map(|m| m.id));
    }
    slots
}

pub struct MealPlanRotator<'a> {
    pub catalog: &'a dyn MealCatalog,
    pub plans: &'a dyn PlanStore,
    pub random: &'a dyn RandomSource,
    pub lookback_days: i64,
}

impl MealPlanRotator<'_> {
    /// Returns the stored plan for `(user_id, date)` when one exists and
    /// `regenerate` is false; otherwise picks new meals and upserts them.
    #[instrument(skip(self))]
    pub async fn generate_plan(
        &self,
        user_id: Uuid,
        date: Date,
        regenerate: bool,
    ) -> Result<PlanWithMeals, ApiError> {
        let existing = self.plans.find_plan(user_id, date).await.map_err(|e| {
            error!(error = %e, "existing plan lookup failed");
            ApiError::DataUnavailable("failed to read meal plans")
        })?;

        if let Some(plan) = existing.filter(|_| !regenerate) {
            let catalog = self.read_catalog().await?;
            debug!("meal plan already exists");
            return Ok(PlanWithMeals::join(plan, &catalog));
        }

        let recently_used = match lookback_window(date, self.lookback_days) {
            Some((from, to)) => self
                .plans
                .recent_meal_ids(user_id, from, to)
                .await
                .map_err(|e| {
                    error!(error = %e, "recent plan lookup failed");
                    ApiError::DataUnavailable("failed to read meal plans")
                })?,
            None => HashSet::new(),
        };

        let catalog = self.read_catalog().await?;
        let slots = select_slots(&catalog, &recently_used, self.random);

        let plan = self
            .plans
            .upsert_plan(user_id, date, slots)
            .await
            .map_err(|e| {
                error!(error = %e, "meal plan upsert failed");
                ApiError::Persistence("failed to save meal plan")
            })?;

        info!(plan_id = %plan.id, excluded = recently_used.len(), "meal plan generated");
        Ok(PlanWithMeals::join(plan, &catalog))
    }

    async fn read_catalog(&self) -> Result<Vec<Meal>, ApiError> {
        self.catalog.list_meals(None).await.map_err(|e| {
            error!(error = %e, "meal catalog read failed");
            ApiError::DataUnavailable("meal catalog unavailable")
        })
    }
}
