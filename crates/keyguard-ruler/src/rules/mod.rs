//! Rule engine contract.
//!
//! One hook per action kind. Hooks receive the batch `Context`, the
//! per-request `ReqMetadata`, and the payload already narrowed to the type
//! valid for that action. A hook must never answer `RuleResult::Unknown`.

pub mod fixed;

use async_trait::async_trait;

use keyguard_core::rules::{
    AccessAccountData, CreateAccountData, LockAccountData, LockWalletData, ReqMetadata,
    RuleResult, SignBeaconAttestationData, SignBeaconProposalData, SignData, UnlockAccountData,
    UnlockWalletData,
};

use crate::context::Context;

pub use fixed::StaticRules;

#[async_trait]
pub trait Rules: Send + Sync {
    async fn on_sign(&self, ctx: &Context, metadata: &ReqMetadata, req: &SignData) -> RuleResult;

    async fn on_sign_beacon_proposal(
        &self,
        ctx: &Context,
        metadata: &ReqMetadata,
        req: &SignBeaconProposalData,
    ) -> RuleResult;

    async fn on_sign_beacon_attestation(
        &self,
        ctx: &Context,
        metadata: &ReqMetadata,
        req: &SignBeaconAttestationData,
    ) -> RuleResult;

    async fn on_list_accounts(
        &self,
        ctx: &Context,
        metadata: &ReqMetadata,
        req: &AccessAccountData,
    ) -> RuleResult;

    async fn on_lock_wallet(
        &self,
        ctx: &Context,
        metadata: &ReqMetadata,
        req: &LockWalletData,
    ) -> RuleResult;

    async fn on_unlock_wallet(
        &self,
        ctx: &Context,
        metadata: &ReqMetadata,
        req: &UnlockWalletData,
    ) -> RuleResult;

    async fn on_lock_account(
        &self,
        ctx: &Context,
        metadata: &ReqMetadata,
        req: &LockAccountData,
    ) -> RuleResult;

    async fn on_unlock_account(
        &self,
        ctx: &Context,
        metadata: &ReqMetadata,
        req: &UnlockAccountData,
    ) -> RuleResult;

    async fn on_create_account(
        &self,
        ctx: &Context,
        metadata: &ReqMetadata,
        req: &CreateAccountData,
    ) -> RuleResult;
}
