pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo::{MealCatalog, PgMealCatalog};
pub use repo_types::{Meal, MealSlot};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::read_routes())
}
