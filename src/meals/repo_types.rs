use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One of the four fixed meal categories of a daily plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snack,
        MealSlot::Dinner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Snack => "snack",
            MealSlot::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "snack" => Ok(MealSlot::Snack),
            "dinner" => Ok(MealSlot::Dinner),
            other => anyhow::bail!("unknown meal slot: {other}"),
        }
    }
}

/// Raw `meals` row.
#[derive(Debug, FromRow)]
pub struct MealRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub calories: Option<i32>,
    pub slot_type: String,
}

/// Catalog meal. Reference data, never written by this service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub calories: Option<i32>,
    #[serde(rename = "type")]
    pub slot: MealSlot,
}

impl TryFrom<MealRow> for Meal {
    type Error = anyhow::Error;

    fn try_from(r: MealRow) -> Result<Self, Self::Error> {
        Ok(Self {
            slot: r.slot_type.parse()?,
            id: r.id,
            name: r.name,
            description: r.description,
            ingredients: r.ingredients.unwrap_or_default(),
            instructions: r.instructions,
            calories: r.calories,
        })
    }
}
