use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use sqlx::{postgres::PgListener, PgPool};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    repo_types::{SubscriptionRow, SubscriptionStatus},
    store::{ChangeCallback, ChangeHub, ChangeSubscription, SubscriptionStore},
};

/// Channel the `subscribers` trigger notifies on.
pub const CHANGE_CHANNEL: &str = "subscription_changes";

#[derive(Clone)]
pub struct PgSubscriptionStore {
    db: PgPool,
    hub: ChangeHub,
}

impl PgSubscriptionStore {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            hub: ChangeHub::default(),
        }
    }

    /// Listens for `subscribers` changes and forwards them to registered
    /// callbacks for as long as the process runs.
    pub async fn spawn_listener(&self) -> anyhow::Result<JoinHandle<()>> {
        let mut listener = PgListener::connect_with(&self.db)
            .await
            .context("connect subscription listener")?;
        listener
            .listen(CHANGE_CHANNEL)
            .await
            .context("listen on subscription channel")?;
        info!(channel = CHANGE_CHANNEL, "subscription listener started");

        let hub = self.hub.clone();
        Ok(tokio::spawn(async move {
            loop {
                match listener.recv().await {
                    Ok(notification) => dispatch(&hub, notification.payload()),
                    Err(e) => {
                        // PgListener reconnects on the next recv.
                        warn!(error = %e, "subscription listener error; retrying");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        }))
    }
}

/// Body of a `subscription_changes` notification: the new row, or just the
/// user id when the row was deleted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChangePayload {
    Row(SubscriptionRow),
    Deleted { user_id: Uuid },
}

fn dispatch(hub: &ChangeHub, payload: &str) {
    let status = match serde_json::from_str::<ChangePayload>(payload) {
        Ok(ChangePayload::Row(row)) => SubscriptionStatus::from(row),
        // Same view as a user who never had a record.
        Ok(ChangePayload::Deleted { user_id }) => SubscriptionStatus::unsubscribed(user_id),
        Err(e) => {
            warn!(error = %e, "malformed subscription notification");
            return;
        }
    };
    let delivered = hub.publish(&status);
    debug!(user_id = %status.user_id, delivered, "subscription change");
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionStore {
    async fn get_current(&self, user_id: Uuid) -> anyhow::Result<Option<SubscriptionStatus>> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT user_id, subscription_tier, subscribed, is_trial_active,
                   trial_end, subscription_end
              FROM subscribers
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get subscription")?;
        Ok(row.map(SubscriptionStatus::from))
    }

    fn on_change(&self, user_id: Uuid, callback: ChangeCallback) -> ChangeSubscription {
        self.hub.register(user_id, callback)
    }
}
