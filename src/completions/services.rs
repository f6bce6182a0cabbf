use time::Date;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::repo_types::CompletionKey;
use crate::{error::ApiError, state::AppState};

/// Marks a meal done. The meal must be in the catalog under `key.slot`.
#[instrument(skip(state))]
pub async fn mark_completed(
    state: &AppState,
    user_id: Uuid,
    date: Date,
    key: CompletionKey,
) -> Result<(), ApiError> {
    let meal = state.meals.find_meal(key.meal_id).await.map_err(|e| {
        error!(error = %e, "meal lookup failed");
        ApiError::DataUnavailable("meal catalog unavailable")
    })?;
    match meal {
        None => return Err(ApiError::BadRequest("unknown meal".into())),
        Some(m) if m.slot != key.slot => {
            return Err(ApiError::BadRequest(format!(
                "meal is a {}, not a {}",
                m.slot, key.slot
            )))
        }
        Some(_) => {}
    }

    state.completions.mark(user_id, date, key).await.map_err(|e| {
        error!(error = %e, "mark completion failed");
        ApiError::Persistence("failed to save meal completion")
    })?;
    info!("meal marked done");
    Ok(())
}

/// Removes the marker; a missing marker is not an error.
#[instrument(skip(state))]
pub async fn unmark_completed(
    state: &AppState,
    user_id: Uuid,
    date: Date,
    key: CompletionKey,
) -> Result<(), ApiError> {
    let removed = state
        .completions
        .unmark(user_id, date, key)
        .await
        .map_err(|e| {
            error!(error = %e, "unmark completion failed");
            ApiError::Persistence("failed to remove meal completion")
        })?;
    info!(removed, "meal unmarked");
    Ok(())
}
