use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use crate::{dates::date_format, meals::MealSlot};

#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    #[serde(with = "date_format")]
    pub date: Date,
    pub meal_id: Uuid,
    pub slot: MealSlot,
}
