//! Ruler service: answers one batch of rule requests.
//!
//! Ordering of a batch call:
//! 1) structural validation (whole-batch rejection aborts here, nothing locked)
//! 2) key locks for signing actions, held until the call returns
//! 3) per request: metadata, dispatch to the rule hook, record the result
//!
//! Failures after step 1 are contained to their own slot.

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::time::{timeout, Instant};
use tracing::Instrument;

use keyguard_core::error::{Result, RulerError};
use keyguard_core::pubkey::HexBytes;
use keyguard_core::rules::{Credentials, ReqMetadata, RuleResult, RulesData, RulesPayload};
use keyguard_core::Action;

use crate::config::{LockOrder, RulerSection};
use crate::context::Context;
use crate::locker::{KeyLockSet, Locker};
use crate::obs::RulerMetrics;
use crate::rules::Rules;

use super::dispatch::dispatch;
use super::metadata::assemble_metadata;
use super::results::ResultSlots;
use super::validate::{validate_batch, Entry};

/// Construct once at startup, then share via Arc.
pub struct Service {
    locker: Arc<dyn Locker>,
    rules: Arc<dyn Rules>,
    metrics: Arc<RulerMetrics>,
    lock_order: LockOrder,
    max_batch: usize,
    parallel: bool,
    hook_timeout: Option<Duration>,
}

impl Service {
    pub fn new(cfg: &RulerSection, locker: Arc<dyn Locker>, rules: Arc<dyn Rules>) -> Self {
        Self {
            locker,
            rules,
            metrics: Arc::new(RulerMetrics::default()),
            lock_order: cfg.lock_order,
            max_batch: cfg.max_batch,
            parallel: cfg.parallel,
            hook_timeout: cfg.hook_timeout(),
        }
    }

    pub fn metrics(&self) -> Arc<RulerMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the rules for a batch of requests sharing one action.
    ///
    /// Returns one result per request, in request order, or a single
    /// `Failed` for an empty batch. No result is ever `Unknown`.
    pub async fn run_rules(
        &self,
        ctx: &Context,
        credentials: Option<&Credentials>,
        action: &str,
        data: &[Option<RulesData>],
    ) -> Vec<RuleResult> {
        let span = tracing::debug_span!("ruler.run_rules", action, entries = data.len());
        self.run_rules_inner(ctx, credentials, action, data)
            .instrument(span)
            .await
    }

    async fn run_rules_inner(
        &self,
        ctx: &Context,
        credentials: Option<&Credentials>,
        action_name: &str,
        data: &[Option<RulesData>],
    ) -> Vec<RuleResult> {
        let action = action_name.parse::<Action>().ok();

        let plan = match validate_batch(action, data, self.max_batch) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::debug!(err = %err, code = err.code(), "Rejected rules batch");
                self.metrics.batch_rejections.inc(&[("reason", err.code())]);
                return ResultSlots::failed(data.len());
            }
        };

        let mut lock_keys = plan.lock_keys;
        if self.lock_order == LockOrder::Sorted {
            lock_keys.sort_unstable();
        }

        // Held until this call returns, on every path.
        let _locks = if lock_keys.is_empty() {
            None
        } else {
            let started = Instant::now();
            let acquire = KeyLockSet::acquire(
                Arc::clone(&self.locker),
                Arc::clone(&self.metrics),
                &lock_keys,
            );
            tokio::select! {
                set = acquire => {
                    self.metrics.lock_wait.observe(&[], started.elapsed());
                    Some(set)
                }
                _ = ctx.cancelled() => {
                    tracing::warn!("Cancelled while waiting for key locks");
                    self.metrics
                        .batch_rejections
                        .inc(&[("reason", RulerError::Cancelled.code())]);
                    let results = ResultSlots::failed(data.len());
                    self.count_results(action, &results);
                    return results;
                }
            }
        };

        let mut slots = ResultSlots::new(data.len());
        let mut pending = Vec::with_capacity(plan.entries.len());
        for (index, entry) in plan.entries.into_iter().enumerate() {
            match entry {
                Some(entry) => pending.push((index, entry)),
                None => slots.set(index, RuleResult::Failed),
            }
        }

        if self.parallel {
            let mut futs: FuturesUnordered<_> = pending
                .into_iter()
                .map(|(index, entry)| async move {
                    (index, self.evaluate(ctx, credentials, action_name, action, entry).await)
                })
                .collect();
            while let Some((index, result)) = futs.next().await {
                slots.set(index, result);
            }
        } else {
            for (index, entry) in pending {
                let result = self.evaluate(ctx, credentials, action_name, action, entry).await;
                slots.set(index, result);
            }
        }

        let results = slots.finish();
        self.count_results(action, &results);
        results
    }

    fn count_results(&self, action: Option<Action>, results: &[RuleResult]) {
        let action = action.map_or("unknown", Action::as_str);
        for r in results {
            self.metrics
                .results
                .inc(&[("action", action), ("result", r.as_str())]);
        }
    }

    /// Evaluate one well-formed request. Never returns `Unknown`.
    async fn evaluate(
        &self,
        ctx: &Context,
        credentials: Option<&Credentials>,
        action_name: &str,
        action: Option<Action>,
        entry: Entry<'_>,
    ) -> RuleResult {
        let req = entry.req;
        let account = req.display_name();

        let metadata = match assemble_metadata(credentials, &req.account_name, &req.pub_key) {
            Ok(md) => md,
            Err(err) => {
                tracing::warn!(account = %account, err = %err, "Failed to assemble metadata");
                return RuleResult::Failed;
            }
        };

        let Some(action) = action else {
            tracing::warn!(account = %account, action = action_name, "Unknown action");
            return RuleResult::Failed;
        };

        let outcome = tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(RulerError::Cancelled),
            r = self.call_hook(ctx, action, &metadata, entry.payload) => r,
        };

        match outcome {
            Ok(result) => result,
            Err(err @ RulerError::UnknownResult) => {
                tracing::error!(account = %account, err = %err, "Unknown result from rule");
                RuleResult::Failed
            }
            Err(err) => {
                tracing::warn!(
                    account = %account,
                    pubkey = %HexBytes(&req.pub_key),
                    err = %err,
                    "Rule evaluation failed"
                );
                RuleResult::Failed
            }
        }
    }

    async fn call_hook(
        &self,
        ctx: &Context,
        action: Action,
        metadata: &ReqMetadata,
        payload: &RulesPayload,
    ) -> Result<RuleResult> {
        let hook = dispatch(self.rules.as_ref(), ctx, action, metadata, payload);
        match self.hook_timeout {
            Some(limit) => timeout(limit, hook)
                .await
                .map_err(|_| RulerError::HookTimeout)?,
            None => hook.await,
        }
    }
}
