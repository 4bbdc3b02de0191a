//! Structural checks run before any lock is taken.

use std::collections::HashSet;

use keyguard_core::error::{Result, RulerError};
use keyguard_core::rules::{RulesData, RulesPayload};
use keyguard_core::{Action, PubKey};

/// A well-formed request with its payload already unwrapped.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub req: &'a RulesData,
    pub payload: &'a RulesPayload,
}

/// Validated batch. `entries[i]` is `None` for a slot that failed its
/// structural checks; `lock_keys` lists the keys to lock in request order
/// (empty for non-locking actions).
#[derive(Debug)]
pub struct BatchPlan<'a> {
    pub entries: Vec<Option<Entry<'a>>>,
    pub lock_keys: Vec<PubKey>,
}

/// Returns `Err` when the whole batch must be rejected: empty, over
/// `max_batch`, or (for locking actions) a missing, malformed, or repeated
/// public key among the well-formed requests.
pub fn validate_batch<'a>(
    action: Option<Action>,
    data: &'a [Option<RulesData>],
    max_batch: usize,
) -> Result<BatchPlan<'a>> {
    if data.is_empty() {
        return Err(RulerError::EmptyBatch);
    }
    if data.len() > max_batch {
        return Err(RulerError::BatchTooLarge { len: data.len(), max: max_batch });
    }

    let entries: Vec<Option<Entry<'a>>> = data
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let Some(req) = slot else {
                tracing::debug!(index, "Received nil rules data");
                return None;
            };
            let Some(payload) = &req.data else {
                tracing::debug!(index, "Received nil data in rules data");
                return None;
            };
            Some(Entry { req, payload })
        })
        .collect();

    let mut lock_keys = Vec::new();
    if action.is_some_and(Action::requires_lock) {
        // A batch may name each key once.
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in entries.iter().flatten() {
            let key = PubKey::from_slice(&entry.req.pub_key)?;
            if !seen.insert(key) {
                return Err(RulerError::DuplicatePubKey(key.to_string()));
            }
            lock_keys.push(key);
        }
    }

    Ok(BatchPlan { entries, lock_keys })
}
