use std::collections::HashMap;

use async_trait::async_trait;

use keyguard_core::rules::{
    AccessAccountData, CreateAccountData, LockAccountData, LockWalletData, ReqMetadata,
    RuleResult, SignBeaconAttestationData, SignBeaconProposalData, SignData, UnlockAccountData,
    UnlockWalletData,
};
use keyguard_core::Action;

use crate::config::RulesSection;
use crate::context::Context;

use super::Rules;

/// Answers a fixed decision per action, ignoring the request contents.
/// Local tooling and tests only; it makes no policy decision.
#[derive(Debug, Clone)]
pub struct StaticRules {
    default: RuleResult,
    actions: HashMap<Action, RuleResult>,
}

impl StaticRules {
    pub fn new(default: RuleResult) -> Self {
        Self {
            default,
            actions: HashMap::new(),
        }
    }

    pub fn from_config(cfg: &RulesSection) -> Self {
        Self {
            default: cfg.default,
            actions: cfg.actions.clone(),
        }
    }

    pub fn with_action(mut self, action: Action, result: RuleResult) -> Self {
        self.actions.insert(action, result);
        self
    }

    pub fn decide(&self, action: Action) -> RuleResult {
        self.actions.get(&action).copied().unwrap_or(self.default)
    }
}

#[async_trait]
impl Rules for StaticRules {
    async fn on_sign(&self, _: &Context, _: &ReqMetadata, _: &SignData) -> RuleResult {
        self.decide(Action::Sign)
    }

    async fn on_sign_beacon_proposal(
        &self,
        _: &Context,
        _: &ReqMetadata,
        _: &SignBeaconProposalData,
    ) -> RuleResult {
        self.decide(Action::SignBeaconProposal)
    }

    async fn on_sign_beacon_attestation(
        &self,
        _: &Context,
        _: &ReqMetadata,
        _: &SignBeaconAttestationData,
    ) -> RuleResult {
        self.decide(Action::SignBeaconAttestation)
    }

    async fn on_list_accounts(
        &self,
        _: &Context,
        _: &ReqMetadata,
        _: &AccessAccountData,
    ) -> RuleResult {
        self.decide(Action::AccessAccount)
    }

    async fn on_lock_wallet(&self, _: &Context, _: &ReqMetadata, _: &LockWalletData) -> RuleResult {
        self.decide(Action::LockWallet)
    }

    async fn on_unlock_wallet(
        &self,
        _: &Context,
        _: &ReqMetadata,
        _: &UnlockWalletData,
    ) -> RuleResult {
        self.decide(Action::UnlockWallet)
    }

    async fn on_lock_account(
        &self,
        _: &Context,
        _: &ReqMetadata,
        _: &LockAccountData,
    ) -> RuleResult {
        self.decide(Action::LockAccount)
    }

    async fn on_unlock_account(
        &self,
        _: &Context,
        _: &ReqMetadata,
        _: &UnlockAccountData,
    ) -> RuleResult {
        self.decide(Action::UnlockAccount)
    }

    async fn on_create_account(
        &self,
        _: &Context,
        _: &ReqMetadata,
        _: &CreateAccountData,
    ) -> RuleResult {
        self.decide(Action::CreateAccount)
    }
}
