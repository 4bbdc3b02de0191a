//! Typed request payloads.
//!
//! `RulesPayload` carries exactly one data type per action kind, so routing
//! a payload to its hook is a single `match`. A payload whose variant does
//! not agree with the batch action is a caller contract violation and is
//! reported by the dispatcher, never coerced.

use serde::{Deserialize, Serialize};

use crate::action::Action;

use super::hex_serde;

/// Generic signing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignData {
    #[serde(with = "hex_serde")]
    pub domain: Vec<u8>,
    #[serde(with = "hex_serde")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignBeaconProposalData {
    #[serde(with = "hex_serde")]
    pub domain: Vec<u8>,
    pub slot: u64,
    pub proposer_index: u64,
    #[serde(with = "hex_serde")]
    pub parent_root: Vec<u8>,
    #[serde(with = "hex_serde")]
    pub state_root: Vec<u8>,
    #[serde(with = "hex_serde")]
    pub body_root: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Checkpoint {
    pub epoch: u64,
    #[serde(with = "hex_serde")]
    pub root: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignBeaconAttestationData {
    #[serde(with = "hex_serde")]
    pub domain: Vec<u8>,
    pub slot: u64,
    pub committee_index: u64,
    #[serde(with = "hex_serde")]
    pub beacon_block_root: Vec<u8>,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

/// Account listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessAccountData {
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LockWalletData {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnlockWalletData {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LockAccountData {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnlockAccountData {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAccountData {}

/// Request payload, tagged by the action it is valid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RulesPayload {
    Sign(SignData),
    SignBeaconProposal(SignBeaconProposalData),
    SignBeaconAttestation(SignBeaconAttestationData),
    AccessAccount(AccessAccountData),
    LockWallet(LockWalletData),
    UnlockWallet(UnlockWalletData),
    LockAccount(LockAccountData),
    UnlockAccount(UnlockAccountData),
    CreateAccount(CreateAccountData),
}

impl RulesPayload {
    /// The only action this payload is valid for.
    pub fn action(&self) -> Action {
        match self {
            RulesPayload::Sign(_) => Action::Sign,
            RulesPayload::SignBeaconProposal(_) => Action::SignBeaconProposal,
            RulesPayload::SignBeaconAttestation(_) => Action::SignBeaconAttestation,
            RulesPayload::AccessAccount(_) => Action::AccessAccount,
            RulesPayload::LockWallet(_) => Action::LockWallet,
            RulesPayload::UnlockWallet(_) => Action::UnlockWallet,
            RulesPayload::LockAccount(_) => Action::LockAccount,
            RulesPayload::UnlockAccount(_) => Action::UnlockAccount,
            RulesPayload::CreateAccount(_) => Action::CreateAccount,
        }
    }
}

/// One request in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesData {
    pub wallet_name: String,
    /// Empty for wallet-level requests.
    #[serde(default)]
    pub account_name: String,
    #[serde(default, with = "hex_serde")]
    pub pub_key: Vec<u8>,
    #[serde(default)]
    pub data: Option<RulesPayload>,
}

impl RulesData {
    /// `wallet` or `wallet/account`, for log fields.
    pub fn display_name(&self) -> String {
        if self.account_name.is_empty() {
            self.wallet_name.clone()
        } else {
            format!("{}/{}", self.wallet_name, self.account_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_reports_its_action() {
        let p = RulesPayload::LockAccount(LockAccountData {});
        assert_eq!(p.action(), Action::LockAccount);
    }

    #[test]
    fn display_name_joins_account() {
        let mut d = RulesData {
            wallet_name: "w1".into(),
            account_name: String::new(),
            pub_key: vec![],
            data: None,
        };
        assert_eq!(d.display_name(), "w1");
        d.account_name = "a1".into();
        assert_eq!(d.display_name(), "w1/a1");
    }
}
