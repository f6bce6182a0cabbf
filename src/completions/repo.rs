use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{CompletionKey, CompletionRow};

/// Meal completion markers, keyed by (user, date, meal, slot).
#[async_trait]
pub trait CompletionStore: Send + Sync {
    /// Idempotent: marking twice keeps one marker.
    async fn mark(&self, user_id: Uuid, date: Date, key: CompletionKey) -> anyhow::Result<()>;

    /// Returns whether a marker was removed.
    async fn unmark(&self, user_id: Uuid, date: Date, key: CompletionKey) -> anyhow::Result<bool>;

    async fn list_for_day(&self, user_id: Uuid, date: Date) -> anyhow::Result<Vec<CompletionKey>>;
}

#[derive(Clone)]
pub struct PgCompletionStore {
    db: PgPool,
}

impl PgCompletionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompletionStore for PgCompletionStore {
    async fn mark(&self, user_id: Uuid, date: Date, key: CompletionKey) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO meal_completions (user_id, completed_date, meal_id, meal_type)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, completed_date, meal_id, meal_type) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(key.meal_id)
        .bind(key.slot.as_str())
        .execute(&self.db)
        .await
        .context("insert meal completion")?;
        Ok(())
    }

    async fn unmark(&self, user_id: Uuid, date: Date, key: CompletionKey) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM meal_completions
             WHERE user_id = $1 AND completed_date = $2 AND meal_id = $3 AND meal_type = $4
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(key.meal_id)
        .bind(key.slot.as_str())
        .execute(&self.db)
        .await
        .context("delete meal completion")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_for_day(&self, user_id: Uuid, date: Date) -> anyhow::Result<Vec<CompletionKey>> {
        let rows = sqlx::query_as::<_, CompletionRow>(
            r#"
            SELECT meal_id, meal_type AS slot_type
              FROM meal_completions
             WHERE user_id = $1 AND completed_date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await
        .context("list meal completions")?;

        rows.into_iter().map(CompletionKey::try_from).collect()
    }
}
