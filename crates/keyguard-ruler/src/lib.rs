//! keyguard ruler library entry.
//!
//! Wires batch validation, per-key locking, metadata assembly, and action
//! dispatch into the `Service` that answers rule batches. The binary
//! (`main.rs`) and integration tests both consume it from here.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod context;
pub mod locker;
pub mod obs;
pub mod rules;
pub mod ruler;

pub use context::{CancelHandle, Context};
pub use locker::{KeyLockSet, Locker, MemLocker};
pub use rules::{Rules, StaticRules};
pub use ruler::Service;
