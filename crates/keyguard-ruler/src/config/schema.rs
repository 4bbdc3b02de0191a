use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use keyguard_core::error::{Result, RulerError};
use keyguard_core::rules::RuleResult;
use keyguard_core::Action;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulerConfig {
    pub version: u32,

    #[serde(default)]
    pub ruler: RulerSection,

    #[serde(default)]
    pub rules: RulesSection,
}

impl RulerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RulerError::UnsupportedVersion);
        }

        self.ruler.validate()?;
        self.rules.validate()?;

        Ok(())
    }
}

/// Order in which a batch takes its key locks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockOrder {
    /// Request order within the batch. Two batches naming overlapping keys in
    /// different orders can deadlock.
    #[default]
    Declared,
    /// Bytewise key order; no cross-batch deadlock.
    Sorted,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulerSection {
    #[serde(default)]
    pub lock_order: LockOrder,

    #[serde(default = "default_max_batch")]
    pub max_batch: usize,

    /// Evaluate requests concurrently once the batch holds its locks.
    #[serde(default)]
    pub parallel: bool,

    /// Per-hook deadline; 0 disables it.
    #[serde(default)]
    pub hook_timeout_ms: u64,
}

impl Default for RulerSection {
    fn default() -> Self {
        Self {
            lock_order: LockOrder::default(),
            max_batch: default_max_batch(),
            parallel: false,
            hook_timeout_ms: 0,
        }
    }
}

impl RulerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=65536).contains(&self.max_batch) {
            return Err(RulerError::BadRequest(
                "ruler.max_batch must be between 1 and 65536".into(),
            ));
        }
        if self.hook_timeout_ms != 0 && !(100..=600000).contains(&self.hook_timeout_ms) {
            return Err(RulerError::BadRequest(
                "ruler.hook_timeout_ms must be 0 or between 100 and 600000".into(),
            ));
        }
        Ok(())
    }

    pub fn hook_timeout(&self) -> Option<Duration> {
        (self.hook_timeout_ms > 0).then(|| Duration::from_millis(self.hook_timeout_ms))
    }
}

fn default_max_batch() -> usize {
    1024
}

/// Fixed decisions for `StaticRules`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesSection {
    #[serde(default = "default_decision")]
    pub default: RuleResult,

    #[serde(default)]
    pub actions: HashMap<Action, RuleResult>,
}

impl Default for RulesSection {
    fn default() -> Self {
        Self {
            default: default_decision(),
            actions: HashMap::new(),
        }
    }
}

impl RulesSection {
    pub fn validate(&self) -> Result<()> {
        if self.default == RuleResult::Unknown {
            return Err(RulerError::BadRequest(
                "rules.default must not be unknown".into(),
            ));
        }
        if let Some((action, _)) = self
            .actions
            .iter()
            .find(|(_, r)| **r == RuleResult::Unknown)
        {
            return Err(RulerError::BadRequest(format!(
                "rules.actions.{action} must not be unknown"
            )));
        }
        Ok(())
    }
}

fn default_decision() -> RuleResult {
    RuleResult::Denied
}
