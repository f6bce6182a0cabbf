use std::collections::HashSet;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{DailyMealPlan, PlanSlots};

/// Persistence for daily plans, keyed by (user, date).
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn find_plan(&self, user_id: Uuid, date: Date) -> anyhow::Result<Option<DailyMealPlan>>;

    /// Meal ids appearing in any slot of the user's plans dated in `from..=to`.
    async fn recent_meal_ids(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
    ) -> anyhow::Result<HashSet<Uuid>>;

    /// Creates the plan or overwrites all four slots of the existing one.
    async fn upsert_plan(
        &self,
        user_id: Uuid,
        date: Date,
        slots: PlanSlots,
    ) -> anyhow::Result<DailyMealPlan>;
}

#[derive(Clone)]
pub struct PgPlanStore {
    db: PgPool,
}

impl PgPlanStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn find_plan(&self, user_id: Uuid, date: Date) -> anyhow::Result<Option<DailyMealPlan>> {
        let plan = sqlx::query_as::<_, DailyMealPlan>(
            r#"
            SELECT id, user_id, date, breakfast_meal_id, lunch_meal_id, snack_meal_id,
                   dinner_meal_id, created_at, updated_at
              FROM daily_meal_plans
             WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await
        .context("find daily meal plan")?;
        Ok(plan)
    }

    async fn recent_meal_ids(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
    ) -> anyhow::Result<HashSet<Uuid>> {
        let rows = sqlx::query_as::<_, (Option<Uuid>, Option<Uuid>, Option<Uuid>, Option<Uuid>)>(
            r#"
            SELECT breakfast_meal_id, lunch_meal_id, snack_meal_id, dinner_meal_id
              FROM daily_meal_plans
             WHERE user_id = $1 AND date BETWEEN $2 AND $3
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await
        .context("list recent meal plans")?;

        Ok(rows
            .into_iter()
            .flat_map(|(b, l, s, d)| [b, l, s, d])
            .flatten()
            .collect())
    }

    async fn upsert_plan(
        &self,
        user_id: Uuid,
        date: Date,
        slots: PlanSlots,
    ) -> anyhow::Result<DailyMealPlan> {
        // Single statement: either every slot changes or none does.
        let plan = sqlx::query_as::<_, DailyMealPlan>(
            r#"
            INSERT INTO daily_meal_plans
                   (user_id, date, breakfast_meal_id, lunch_meal_id, snack_meal_id, dinner_meal_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, date) DO UPDATE
               SET breakfast_meal_id = EXCLUDED.breakfast_meal_id,
                   lunch_meal_id     = EXCLUDED.lunch_meal_id,
                   snack_meal_id     = EXCLUDED.snack_meal_id,
                   dinner_meal_id    = EXCLUDED.dinner_meal_id,
                   updated_at        = now()
            RETURNING id, user_id, date, breakfast_meal_id, lunch_meal_id, snack_meal_id,
                      dinner_meal_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(slots.breakfast)
        .bind(slots.lunch)
        .bind(slots.snack)
        .bind(slots.dinner)
        .fetch_one(&self.db)
        .await
        .context("upsert daily meal plan")?;
        Ok(plan)
    }
}
