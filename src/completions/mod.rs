//! Per-day "meal done" markers.

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{CompletionStore, PgCompletionStore};
pub use repo_types::CompletionKey;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::write_routes())
}
