use sqlx::FromRow;
use uuid::Uuid;

use crate::meals::MealSlot;

/// A "done" marker for one planned meal on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionKey {
    pub meal_id: Uuid,
    pub slot: MealSlot,
}

impl CompletionKey {
    pub fn new(meal_id: Uuid, slot: MealSlot) -> Self {
        Self { meal_id, slot }
    }
}

#[derive(Debug, FromRow)]
pub struct CompletionRow {
    pub meal_id: Uuid,
    pub slot_type: String,
}

impl TryFrom<CompletionRow> for CompletionKey {
    type Error = anyhow::Error;

    fn try_from(r: CompletionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            meal_id: r.meal_id,
            slot: r.slot_type.parse()?,
        })
    }
}
