use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Meal, MealRow, MealSlot};

/// Read access to the meal catalog.
#[async_trait]
pub trait MealCatalog: Send + Sync {
    /// All meals, or only those of one slot-type, ordered by name.
    async fn list_meals(&self, slot: Option<MealSlot>) -> anyhow::Result<Vec<Meal>>;

    async fn find_meal(&self, id: Uuid) -> anyhow::Result<Option<Meal>>;
}

#[derive(Clone)]
pub struct PgMealCatalog {
    db: PgPool,
}

impl PgMealCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealCatalog for PgMealCatalog {
    async fn list_meals(&self, slot: Option<MealSlot>) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, MealRow>(
            r#"
            SELECT id, name, description, ingredients, instructions, calories, type AS slot_type
              FROM meals
             WHERE $1::text IS NULL OR type = $1
             ORDER BY name ASC
            "#,
        )
        .bind(slot.map(MealSlot::as_str))
        .fetch_all(&self.db)
        .await
        .context("list meals")?;

        rows.into_iter().map(Meal::try_from).collect()
    }

    async fn find_meal(&self, id: Uuid) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, MealRow>(
            r#"
            SELECT id, name, description, ingredients, instructions, calories, type AS slot_type
              FROM meals
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find meal")?;

        row.map(Meal::try_from).transpose()
    }
}
