//! Rule-engine facing types: results, caller credentials, request metadata,
//! and the typed request payloads.

pub mod data;
mod hex_serde;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use data::{
    AccessAccountData, Checkpoint, CreateAccountData, LockAccountData, LockWalletData,
    RulesData, RulesPayload, SignBeaconAttestationData, SignBeaconProposalData, SignData,
    UnlockAccountData, UnlockWalletData,
};

/// Outcome of a rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleResult {
    /// Placeholder for a slot that has not been decided. Never a final value.
    Unknown,
    Approved,
    Denied,
    /// Validation, dispatch, or evaluator failure.
    Failed,
}

impl RuleResult {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleResult::Unknown => "unknown",
            RuleResult::Approved => "approved",
            RuleResult::Denied => "denied",
            RuleResult::Failed => "failed",
        }
    }
}

impl fmt::Display for RuleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller identity, produced upstream by the authentication layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    /// Client name from the TLS certificate. Must be non-empty.
    pub client: String,
    /// Remote address of the caller.
    #[serde(default)]
    pub ip: String,
}

/// Per-request metadata handed to every rule hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReqMetadata {
    /// Account name within the wallet; empty for wallet-level requests.
    pub account: String,
    pub pub_key: Vec<u8>,
    pub ip: String,
    pub client: String,
}
