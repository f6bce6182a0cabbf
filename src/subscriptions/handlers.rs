use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Json, Router,
};
use futures::{stream, Stream, StreamExt};
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use super::{
    access::has_access,
    dto::{AccessView, SubscriptionView, TrialView},
    repo_types::SubscriptionStatus,
    services::current_status,
};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/subscription", get(get_subscription))
        .route("/subscription/trial", get(get_trial))
        .route("/subscription/access/:feature", get(get_access))
        .route("/subscription/events", get(subscription_events))
}

#[instrument(skip(state))]
pub async fn get_subscription(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<SubscriptionView>, ApiError> {
    let s = current_status(&state, user_id).await?;
    Ok(Json(SubscriptionView::new(&s, OffsetDateTime::now_utc())))
}

#[instrument(skip(state))]
pub async fn get_trial(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<TrialView>, ApiError> {
    let s = current_status(&state, user_id).await?;
    Ok(Json(TrialView::new(&s, OffsetDateTime::now_utc())))
}

#[instrument(skip(state))]
pub async fn get_access(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(feature): Path<String>,
) -> Result<Json<AccessView>, ApiError> {
    let s = current_status(&state, user_id).await?;
    let allowed = has_access(&s, &feature);
    debug!(tier = %s.tier, %feature, allowed, "access check");
    Ok(Json(AccessView { feature, allowed }))
}

/// Streams a `subscription` event with the current view, then one per change.
#[instrument(skip(state))]
pub async fn subscription_events(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let (tx, rx) = mpsc::unbounded_channel::<SubscriptionStatus>();
    // Register before reading so no change between the two is lost.
    let handle = state.subscriptions.on_change(
        user_id,
        Arc::new(move |s: &SubscriptionStatus| {
            let _ = tx.send(s.clone());
        }),
    );
    let current = current_status(&state, user_id).await?;

    let updates = stream::unfold((rx, handle), |(mut rx, handle)| async move {
        rx.recv().await.map(|s| (s, (rx, handle)))
    });
    let events = stream::once(async move { current })
        .chain(updates)
        .filter_map(|s| async move {
            let view = SubscriptionView::new(&s, OffsetDateTime::now_utc());
            match Event::default().event("subscription").json_data(view) {
                Ok(event) => Some(Ok(event)),
                Err(e) => {
                    warn!(error = %e, "failed to encode subscription event");
                    None
                }
            }
        });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
