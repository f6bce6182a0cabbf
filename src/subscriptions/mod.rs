//! Subscription records, tier-based feature access and trial countdown.

pub mod access;
pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod store;

use crate::state::AppState;
use axum::Router;

pub use repo::PgSubscriptionStore;
pub use repo_types::{SubscriptionStatus, Tier};
pub use store::{ChangeCallback, ChangeHub, ChangeSubscription, SubscriptionStore};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::read_routes())
}
