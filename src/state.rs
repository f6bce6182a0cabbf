use std::sync::Arc;

use crate::completions::{CompletionStore, PgCompletionStore};
use crate::config::AppConfig;
use crate::meal_plans::{PgPlanStore, PlanStore, RandomSource, ThreadRandom};
use crate::meals::{MealCatalog, PgMealCatalog};
use crate::subscriptions::{PgSubscriptionStore, SubscriptionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub meals: Arc<dyn MealCatalog>,
    pub plans: Arc<dyn PlanStore>,
    pub completions: Arc<dyn CompletionStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub random: Arc<dyn RandomSource>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = crate::db::connect(&config).await?;
        crate::db::run_migrations(&db).await;

        let subscriptions = PgSubscriptionStore::new(db.clone());
        // The handle is detached; the listener lives as long as the runtime.
        subscriptions.spawn_listener().await?;

        Ok(Self {
            meals: Arc::new(PgMealCatalog::new(db.clone())),
            plans: Arc::new(PgPlanStore::new(db.clone())),
            completions: Arc::new(PgCompletionStore::new(db)),
            subscriptions: Arc::new(subscriptions),
            random: Arc::new(ThreadRandom),
            config,
        })
    }

    /// In-memory stores with an empty catalog and a test JWT config.
    #[cfg(test)]
    pub fn fake() -> Self {
        crate::memory::FakeBackend::new(Vec::new()).state()
    }
}
