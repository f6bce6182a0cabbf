use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::meals::{Meal, MealSlot};

/// Meal ids chosen for each slot of one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSlots {
    pub breakfast: Option<Uuid>,
    pub lunch: Option<Uuid>,
    pub snack: Option<Uuid>,
    pub dinner: Option<Uuid>,
}

impl PlanSlots {
    pub fn get(&self, slot: MealSlot) -> Option<Uuid> {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Snack => self.snack,
            MealSlot::Dinner => self.dinner,
        }
    }

    pub fn set(&mut self, slot: MealSlot, meal_id: Option<Uuid>) {
        match slot {
            MealSlot::Breakfast => self.breakfast = meal_id,
            MealSlot::Lunch => self.lunch = meal_id,
            MealSlot::Snack => self.snack = meal_id,
            MealSlot::Dinner => self.dinner = meal_id,
        }
    }

    pub fn meal_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        MealSlot::ALL.into_iter().filter_map(|s| self.get(s))
    }
}

/// `daily_meal_plans` row. Unique on (user_id, date).
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DailyMealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub breakfast_meal_id: Option<Uuid>,
    pub lunch_meal_id: Option<Uuid>,
    pub snack_meal_id: Option<Uuid>,
    pub dinner_meal_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl DailyMealPlan {
    pub fn slots(&self) -> PlanSlots {
        PlanSlots {
            breakfast: self.breakfast_meal_id,
            lunch: self.lunch_meal_id,
            snack: self.snack_meal_id,
            dinner: self.dinner_meal_id,
        }
    }
}

/// A plan with every filled slot resolved to its catalog meal.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanWithMeals {
    pub plan: DailyMealPlan,
    pub breakfast: Option<Meal>,
    pub lunch: Option<Meal>,
    pub snack: Option<Meal>,
    pub dinner: Option<Meal>,
}

impl PlanWithMeals {
    /// Joins slot references against the catalog. A reference to a meal
    /// missing from the catalog resolves to `None`.
    pub fn join(plan: DailyMealPlan, catalog: &[Meal]) -> Self {
        let slots = plan.slots();
        let resolve = |slot: MealSlot| {
            slots
                .get(slot)
                .and_then(|id| catalog.iter().find(|m| m.id == id && m.slot == slot))
                .cloned()
        };
        Self {
            breakfast: resolve(MealSlot::Breakfast),
            lunch: resolve(MealSlot::Lunch),
            snack: resolve(MealSlot::Snack),
            dinner: resolve(MealSlot::Dinner),
            plan,
        }
    }

    pub fn meal(&self, slot: MealSlot) -> Option<&Meal> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_ref(),
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Snack => self.snack.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
        }
    }
}
