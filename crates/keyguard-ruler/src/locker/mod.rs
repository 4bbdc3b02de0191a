//! Per-key mutual exclusion.
//!
//! `Locker` is the injected lock manager contract; `MemLocker` is the
//! in-process implementation; `KeyLockSet` scopes a batch's locks so every
//! acquired key is released on every exit path.

pub mod mem;
pub mod set;

use async_trait::async_trait;

use keyguard_core::PubKey;

pub use mem::MemLocker;
pub use set::KeyLockSet;

/// Key lock manager. `lock` waits until the key is free; `unlock` releases a
/// key previously returned by `lock` and does not block.
#[async_trait]
pub trait Locker: Send + Sync {
    async fn lock(&self, key: PubKey);
    fn unlock(&self, key: PubKey);
}
