use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Subscription level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Trial,
    Basic,
    Premium,
    Elite,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Trial => "trial",
            Tier::Basic => "basic",
            Tier::Premium => "premium",
            Tier::Elite => "elite",
        }
    }

    /// Stored tier names outside the known set, and missing ones, are trial.
    pub fn from_db(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("basic") => Tier::Basic,
            Some("premium") => Tier::Premium,
            Some("elite") => Tier::Elite,
            _ => Tier::Trial,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current subscription record of one user.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionStatus {
    pub user_id: Uuid,
    pub tier: Tier,
    pub subscribed: bool,
    pub trial_active: bool,
    pub trial_end: Option<OffsetDateTime>,
    pub subscription_end: Option<OffsetDateTime>,
}

impl SubscriptionStatus {
    /// What a user without a `subscribers` row gets.
    pub fn unsubscribed(user_id: Uuid) -> Self {
        Self {
            user_id,
            tier: Tier::Trial,
            subscribed: false,
            trial_active: false,
            trial_end: None,
            subscription_end: None,
        }
    }
}

/// `subscribers` row, also the payload of `subscription_changes`
/// notifications.
#[derive(Debug, Clone, FromRow, Deserialize)]
pub struct SubscriptionRow {
    pub user_id: Uuid,
    pub subscription_tier: Option<String>,
    pub subscribed: bool,
    pub is_trial_active: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub trial_end: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub subscription_end: Option<OffsetDateTime>,
}

impl From<SubscriptionRow> for SubscriptionStatus {
    fn from(r: SubscriptionRow) -> Self {
        Self {
            user_id: r.user_id,
            tier: Tier::from_db(r.subscription_tier.as_deref()),
            subscribed: r.subscribed,
            trial_active: r.is_trial_active,
            trial_end: r.trial_end,
            subscription_end: r.subscription_end,
        }
    }
}
