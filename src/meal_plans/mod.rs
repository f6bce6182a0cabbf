//! Daily meal plans: generation, lookup and per-day progress.

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod rotator;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{PgPlanStore, PlanStore};
pub use rotator::{RandomSource, ThreadRandom};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
