use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use keyguard_core::PubKey;

use super::Locker;

/// In-process key locker:
/// - `slots`: `pubkey -> mutex`, present while the key is held or awaited
/// - `held`: `pubkey -> guard` for keys currently locked
#[derive(Default)]
pub struct MemLocker {
    slots: DashMap<PubKey, Arc<Mutex<()>>>,
    held: DashMap<PubKey, OwnedMutexGuard<()>>,
}

impl MemLocker {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            held: DashMap::new(),
        }
    }

    pub fn is_locked(&self, key: &PubKey) -> bool {
        self.held.contains_key(key)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[async_trait]
impl Locker for MemLocker {
    async fn lock(&self, key: PubKey) {
        let slot = self
            .slots
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        let guard = slot.lock_owned().await;
        self.held.insert(key, guard);
    }

    fn unlock(&self, key: PubKey) {
        let Some((_, guard)) = self.held.remove(&key) else {
            tracing::warn!(pubkey = %key, "unlock of key that is not held");
            return;
        };
        drop(guard);
        // Drop the mutex once no holder or waiter references it. Waiters clone
        // the slot under the same shard lock, so a referenced slot is never removed.
        self.slots.remove_if(&key, |_, slot| Arc::strong_count(slot) == 1);
    }
}
