use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::{Meal, MealSlot};

#[derive(Debug, Deserialize)]
pub struct MealQuery {
    #[serde(rename = "type", default)]
    pub slot: Option<MealSlot>,
}

/// Meal as embedded in a plan: no slot-type, the plan field already says it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealDetails {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub calories: Option<i32>,
}

impl From<Meal> for MealDetails {
    fn from(m: Meal) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            ingredients: m.ingredients,
            instructions: m.instructions,
            calories: m.calories,
        }
    }
}
