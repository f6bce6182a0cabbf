use std::collections::BTreeMap;

use serde::Serialize;
use time::OffsetDateTime;

use super::{
    access::{feature_matrix, trial_expired, trial_status},
    repo_types::{SubscriptionStatus, Tier},
};

#[derive(Debug, Serialize)]
pub struct TrialView {
    pub days_remaining: i64,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub trial_end: Option<OffsetDateTime>,
    pub subscribed: bool,
    pub trial_expired: bool,
}

impl TrialView {
    pub fn new(s: &SubscriptionStatus, now: OffsetDateTime) -> Self {
        let status = trial_status(s, now);
        Self {
            days_remaining: status.days_remaining,
            is_active: status.is_active,
            trial_end: s.trial_end,
            subscribed: s.subscribed,
            trial_expired: trial_expired(s, now),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionView {
    pub tier: Tier,
    pub subscribed: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub subscription_end: Option<OffsetDateTime>,
    pub features: BTreeMap<&'static str, bool>,
    pub trial: TrialView,
}

impl SubscriptionView {
    pub fn new(s: &SubscriptionStatus, now: OffsetDateTime) -> Self {
        Self {
            tier: s.tier,
            subscribed: s.subscribed,
            subscription_end: s.subscription_end,
            features: feature_matrix(s),
            trial: TrialView::new(s, now),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccessView {
    pub feature: String,
    pub allowed: bool,
}
