use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, Weak},
};

use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::SubscriptionStatus;

/// Invoked with the new record whenever a user's subscription changes.
/// Runs on the notifier's task and must not block.
pub type ChangeCallback = Arc<dyn Fn(&SubscriptionStatus) + Send + Sync>;

/// Source of subscription records plus change notifications.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn get_current(&self, user_id: Uuid) -> anyhow::Result<Option<SubscriptionStatus>>;

    /// Registers `callback` for changes to `user_id`'s record until the
    /// returned handle is dropped.
    fn on_change(&self, user_id: Uuid, callback: ChangeCallback) -> ChangeSubscription;
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<Uuid, Vec<(u64, ChangeCallback)>>,
}

/// Per-user callback registry shared by store implementations.
#[derive(Clone, Default)]
pub struct ChangeHub {
    inner: Arc<Mutex<Registry>>,
}

fn lock(m: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ChangeHub {
    pub fn register(&self, user_id: Uuid, callback: ChangeCallback) -> ChangeSubscription {
        let mut reg = lock(&self.inner);
        let id = reg.next_id;
        reg.next_id += 1;
        reg.listeners.entry(user_id).or_default().push((id, callback));
        ChangeSubscription {
            registry: Arc::downgrade(&self.inner),
            user_id,
            id,
        }
    }

    /// Calls every callback registered for the record's user. Returns how
    /// many were called.
    pub fn publish(&self, status: &SubscriptionStatus) -> usize {
        let callbacks: Vec<ChangeCallback> = lock(&self.inner)
            .listeners
            .get(&status.user_id)
            .map(|v| v.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default();
        // Outside the lock so a callback may register or drop handles.
        for cb in &callbacks {
            cb(status);
        }
        callbacks.len()
    }

    #[cfg(test)]
    pub fn listener_count(&self, user_id: Uuid) -> usize {
        lock(&self.inner)
            .listeners
            .get(&user_id)
            .map_or(0, Vec::len)
    }
}

/// Handle returned by [`SubscriptionStore::on_change`].
#[must_use = "dropping the handle unregisters the callback"]
pub struct ChangeSubscription {
    registry: Weak<Mutex<Registry>>,
    user_id: Uuid,
    id: u64,
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let mut reg = lock(&inner);
        if let Some(list) = reg.listeners.get_mut(&self.user_id) {
            list.retain(|(id, _)| *id != self.id);
            if list.is_empty() {
                reg.listeners.remove(&self.user_id);
            }
        }
    }
}
