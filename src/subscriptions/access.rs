//! Feature gating by subscription tier, and the trial countdown.
//!
//! Everything here is pure: callers fetch a fresh [`SubscriptionStatus`]
//! first and decide what to do with a denial.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use time::OffsetDateTime;

use super::repo_types::{SubscriptionStatus, Tier};

const NANOS_PER_DAY: i128 = 86_400 * 1_000_000_000;

/// Feature names callers ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Feature {
    Chat,
    MealPlan,
    WeightTracking,
    Exercises,
    PremiumRecipes,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Chat,
        Feature::MealPlan,
        Feature::WeightTracking,
        Feature::Exercises,
        Feature::PremiumRecipes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Chat => "chat",
            Feature::MealPlan => "meal-plan",
            Feature::WeightTracking => "weight-tracking",
            Feature::Exercises => "exercises",
            Feature::PremiumRecipes => "premium-recipes",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Feature::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const BASIC_FEATURES: [Feature; 3] = [Feature::Chat, Feature::MealPlan, Feature::WeightTracking];

/// Elite gets everything, basic a fixed allow-list, every other tier chat
/// only. Unknown feature names are denied outside elite.
pub fn has_access(subscription: &SubscriptionStatus, feature: &str) -> bool {
    match subscription.tier {
        Tier::Elite => true,
        Tier::Basic => Feature::parse(feature).is_some_and(|f| BASIC_FEATURES.contains(&f)),
        Tier::Trial | Tier::Premium => Feature::parse(feature) == Some(Feature::Chat),
    }
}

/// Decision for every known feature, keyed by feature name.
pub fn feature_matrix(subscription: &SubscriptionStatus) -> BTreeMap<&'static str, bool> {
    Feature::ALL
        .into_iter()
        .map(|f| (f.as_str(), has_access(subscription, f.as_str())))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialStatus {
    pub days_remaining: i64,
    pub is_active: bool,
}

/// Whole days left in the trial, rounded up and never negative.
pub fn trial_status(subscription: &SubscriptionStatus, now: OffsetDateTime) -> TrialStatus {
    let Some(trial_end) = subscription.trial_end else {
        return TrialStatus {
            days_remaining: 0,
            is_active: false,
        };
    };

    let remaining = (trial_end - now).whole_nanoseconds();
    let days = if remaining > 0 {
        (remaining + NANOS_PER_DAY - 1) / NANOS_PER_DAY
    } else {
        0
    };
    let days_remaining = i64::try_from(days).unwrap_or(i64::MAX);

    TrialStatus {
        days_remaining,
        is_active: subscription.trial_active && days_remaining > 0,
    }
}

/// The trial has ended and no paid subscription replaced it. A user who
/// never had a trial end counts as expired.
pub fn trial_expired(subscription: &SubscriptionStatus, now: OffsetDateTime) -> bool {
    !subscription.subscribed && subscription.trial_end.map_or(true, |end| end < now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{macros::datetime, Duration};
    use uuid::Uuid;

    fn sub(tier: Tier) -> SubscriptionStatus {
        SubscriptionStatus {
            tier,
            ..SubscriptionStatus::unsubscribed(Uuid::new_v4())
        }
    }

    fn trial(trial_active: bool, trial_end: Option<OffsetDateTime>) -> SubscriptionStatus {
        SubscriptionStatus {
            trial_active,
            trial_end,
            ..SubscriptionStatus::unsubscribed(Uuid::new_v4())
        }
    }

    const NOW: OffsetDateTime = datetime!(2025-06-01 12:00 UTC);

    #[test]
    fn access_by_tier() {
        let cases = [
            (Tier::Elite, "chat", true),
            (Tier::Elite, "meal-plan", true),
            (Tier::Elite, "weight-tracking", true),
            (Tier::Elite, "exercises", true),
            (Tier::Elite, "premium-recipes", true),
            (Tier::Elite, "something-new", true),
            (Tier::Basic, "chat", true),
            (Tier::Basic, "meal-plan", true),
            (Tier::Basic, "weight-tracking", true),
            (Tier::Basic, "exercises", false),
            (Tier::Basic, "premium-recipes", false),
            (Tier::Basic, "something-new", false),
            (Tier::Trial, "chat", true),
            (Tier::Trial, "meal-plan", false),
            (Tier::Trial, "exercises", false),
            (Tier::Premium, "chat", true),
            (Tier::Premium, "exercises", false),
        ];
        for (tier, feature, expected) in cases {
            assert_eq!(
                has_access(&sub(tier), feature),
                expected,
                "{tier} / {feature}"
            );
        }
    }

    #[test]
    fn feature_names_are_exact() {
        assert!(!has_access(&sub(Tier::Basic), "Chat"));
        assert!(!has_access(&sub(Tier::Trial), " chat"));
        assert_eq!(Feature::parse("meal-plan"), Some(Feature::MealPlan));
        assert_eq!(Feature::parse("meal_plan"), None);
    }

    #[test]
    fn matrix_covers_every_feature() {
        let m = feature_matrix(&sub(Tier::Basic));
        assert_eq!(m.len(), Feature::ALL.len());
        assert!(m["chat"]);
        assert!(!m["exercises"]);
    }

    #[test]
    fn thirty_six_hours_is_two_days() {
        let s = trial(true, Some(NOW + Duration::hours(36)));
        assert_eq!(
            trial_status(&s, NOW),
            TrialStatus {
                days_remaining: 2,
                is_active: true
            }
        );
    }

    #[test]
    fn exactly_one_day_is_one_day() {
        let s = trial(true, Some(NOW + Duration::days(1)));
        assert_eq!(trial_status(&s, NOW).days_remaining, 1);
    }

    #[test]
    fn ended_trial_is_zero_and_inactive() {
        for flag in [true, false] {
            let s = trial(flag, Some(NOW - Duration::seconds(1)));
            assert_eq!(
                trial_status(&s, NOW),
                TrialStatus {
                    days_remaining: 0,
                    is_active: false
                }
            );
        }
        let long_gone = trial(true, Some(NOW - Duration::days(40)));
        assert_eq!(trial_status(&long_gone, NOW).days_remaining, 0);
    }

    #[test]
    fn inactive_flag_wins_over_remaining_days() {
        let s = trial(false, Some(NOW + Duration::days(3)));
        let status = trial_status(&s, NOW);
        assert_eq!(status.days_remaining, 3);
        assert!(!status.is_active);
    }

    #[test]
    fn no_trial_end() {
        assert_eq!(
            trial_status(&trial(true, None), NOW),
            TrialStatus {
                days_remaining: 0,
                is_active: false
            }
        );
    }

    #[test]
    fn expired_only_without_subscription() {
        let mut s = trial(false, Some(NOW - Duration::hours(1)));
        assert!(trial_expired(&s, NOW));
        s.subscribed = true;
        assert!(!trial_expired(&s, NOW));
        assert!(!trial_expired(&trial(true, Some(NOW + Duration::hours(1))), NOW));
    }

    #[test]
    fn missing_trial_end_is_expired_unless_subscribed() {
        assert!(trial_expired(&trial(true, None), NOW));
        assert!(trial_expired(&SubscriptionStatus::unsubscribed(Uuid::new_v4()), NOW));

        let paid = SubscriptionStatus {
            subscribed: true,
            ..SubscriptionStatus::unsubscribed(Uuid::new_v4())
        };
        assert!(!trial_expired(&paid, NOW));
    }
}
