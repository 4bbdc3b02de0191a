use std::sync::Arc;

use keyguard_core::PubKey;

use crate::obs::metrics::RulerMetrics;

use super::Locker;

/// Locks held by one batch. Dropping the set (or the future still acquiring
/// it) unlocks every key taken so far, in reverse order.
pub struct KeyLockSet {
    locker: Arc<dyn Locker>,
    metrics: Arc<RulerMetrics>,
    held: Vec<PubKey>,
}

impl KeyLockSet {
    /// Lock `keys` one at a time, in the order given.
    pub async fn acquire(
        locker: Arc<dyn Locker>,
        metrics: Arc<RulerMetrics>,
        keys: &[PubKey],
    ) -> Self {
        let mut set = Self {
            locker,
            metrics,
            held: Vec::with_capacity(keys.len()),
        };
        for key in keys {
            set.locker.lock(*key).await;
            set.held.push(*key);
            set.metrics.locks_held.inc(&[]);
        }
        set
    }
}

impl Drop for KeyLockSet {
    fn drop(&mut self) {
        while let Some(key) = self.held.pop() {
            self.locker.unlock(key);
            self.metrics.locks_held.dec(&[]);
        }
    }
}
