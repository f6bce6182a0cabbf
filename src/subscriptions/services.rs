use tracing::error;
use uuid::Uuid;

use super::repo_types::SubscriptionStatus;
use crate::{error::ApiError, state::AppState};

/// Current record, or the unsubscribed default when the user has none.
pub async fn current_status(
    state: &AppState,
    user_id: Uuid,
) -> Result<SubscriptionStatus, ApiError> {
    let found = state.subscriptions.get_current(user_id).await.map_err(|e| {
        error!(error = %e, %user_id, "subscription lookup failed");
        ApiError::DataUnavailable("subscription unavailable")
    })?;
    Ok(found.unwrap_or_else(|| SubscriptionStatus::unsubscribed(user_id)))
}
