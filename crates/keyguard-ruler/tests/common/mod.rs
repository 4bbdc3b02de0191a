//! Recording fakes for the lock manager and the rule engine.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use keyguard_core::rules::{
    AccessAccountData, CreateAccountData, Credentials, LockAccountData, LockWalletData,
    ReqMetadata, RuleResult, RulesData, RulesPayload, SignBeaconAttestationData,
    SignBeaconProposalData, SignData, UnlockAccountData, UnlockWalletData,
};
use keyguard_core::{Action, PubKey, PUBKEY_LEN};
use keyguard_ruler::{Context, Locker, MemLocker, Rules};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockEvent {
    Lock(PubKey),
    Unlock(PubKey),
}

/// `MemLocker` that records every completed lock and every unlock.
#[derive(Default)]
pub struct RecordingLocker {
    inner: MemLocker,
    events: Mutex<Vec<LockEvent>>,
}

impl RecordingLocker {
    pub fn events(&self) -> Vec<LockEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn lock_count(&self) -> usize {
        self.events().iter().filter(|e| matches!(e, LockEvent::Lock(_))).count()
    }

    pub fn unlock_count(&self) -> usize {
        self.events().iter().filter(|e| matches!(e, LockEvent::Unlock(_))).count()
    }

    pub fn locked_keys(&self) -> Vec<PubKey> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                LockEvent::Lock(k) => Some(k),
                LockEvent::Unlock(_) => None,
            })
            .collect()
    }

    pub fn is_locked(&self, key: &PubKey) -> bool {
        self.inner.is_locked(key)
    }

    pub fn held_count(&self) -> usize {
        self.inner.held_count()
    }
}

#[async_trait]
impl Locker for RecordingLocker {
    async fn lock(&self, key: PubKey) {
        self.inner.lock(key).await;
        self.events.lock().unwrap().push(LockEvent::Lock(key));
    }

    fn unlock(&self, key: PubKey) {
        self.events.lock().unwrap().push(LockEvent::Unlock(key));
        self.inner.unlock(key);
    }
}

/// Rule engine that records each call and then waits on a gate before
/// answering a fixed result.
pub struct GateRules {
    gate: Semaphore,
    entered: Notify,
    calls: Mutex<Vec<(Action, ReqMetadata)>>,
    answer: RuleResult,
}

impl GateRules {
    pub fn open(answer: RuleResult) -> Self {
        Self::with_permits(answer, Semaphore::MAX_PERMITS)
    }

    pub fn closed(answer: RuleResult) -> Self {
        Self::with_permits(answer, 0)
    }

    fn with_permits(answer: RuleResult, permits: usize) -> Self {
        Self {
            gate: Semaphore::new(permits),
            entered: Notify::new(),
            calls: Mutex::new(Vec::new()),
            answer,
        }
    }

    pub fn release(&self) {
        self.gate.add_permits(1024);
    }

    /// Returns once some hook has been entered since the last wait.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn calls(&self) -> Vec<(Action, ReqMetadata)> {
        self.calls.lock().unwrap().clone()
    }

    async fn hit(&self, action: Action, metadata: &ReqMetadata) -> RuleResult {
        self.calls.lock().unwrap().push((action, metadata.clone()));
        self.entered.notify_one();
        let _permit = self.gate.acquire().await.unwrap();
        self.answer
    }
}

#[async_trait]
impl Rules for GateRules {
    async fn on_sign(&self, _: &Context, md: &ReqMetadata, _: &SignData) -> RuleResult {
        self.hit(Action::Sign, md).await
    }
    async fn on_sign_beacon_proposal(
        &self,
        _: &Context,
        md: &ReqMetadata,
        _: &SignBeaconProposalData,
    ) -> RuleResult {
        self.hit(Action::SignBeaconProposal, md).await
    }
    async fn on_sign_beacon_attestation(
        &self,
        _: &Context,
        md: &ReqMetadata,
        _: &SignBeaconAttestationData,
    ) -> RuleResult {
        self.hit(Action::SignBeaconAttestation, md).await
    }
    async fn on_list_accounts(
        &self,
        _: &Context,
        md: &ReqMetadata,
        _: &AccessAccountData,
    ) -> RuleResult {
        self.hit(Action::AccessAccount, md).await
    }
    async fn on_lock_wallet(
        &self,
        _: &Context,
        md: &ReqMetadata,
        _: &LockWalletData,
    ) -> RuleResult {
        self.hit(Action::LockWallet, md).await
    }
    async fn on_unlock_wallet(
        &self,
        _: &Context,
        md: &ReqMetadata,
        _: &UnlockWalletData,
    ) -> RuleResult {
        self.hit(Action::UnlockWallet, md).await
    }
    async fn on_lock_account(
        &self,
        _: &Context,
        md: &ReqMetadata,
        _: &LockAccountData,
    ) -> RuleResult {
        self.hit(Action::LockAccount, md).await
    }
    async fn on_unlock_account(
        &self,
        _: &Context,
        md: &ReqMetadata,
        _: &UnlockAccountData,
    ) -> RuleResult {
        self.hit(Action::UnlockAccount, md).await
    }
    async fn on_create_account(
        &self,
        _: &Context,
        md: &ReqMetadata,
        _: &CreateAccountData,
    ) -> RuleResult {
        self.hit(Action::CreateAccount, md).await
    }
}

pub fn key(b: u8) -> PubKey {
    PubKey::new([b; PUBKEY_LEN])
}

pub fn creds() -> Credentials {
    Credentials {
        client: "validator-client".into(),
        ip: "10.0.0.7".into(),
    }
}

pub fn request(account: &str, key_byte: u8, payload: RulesPayload) -> Option<RulesData> {
    Some(RulesData {
        wallet_name: "w1".into(),
        account_name: account.into(),
        pub_key: vec![key_byte; PUBKEY_LEN],
        data: Some(payload),
    })
}

pub fn sign(key_byte: u8) -> Option<RulesData> {
    request(
        &format!("v{key_byte}"),
        key_byte,
        RulesPayload::Sign(SignData {
            domain: vec![0; 32],
            data: vec![key_byte; 32],
        }),
    )
}

pub fn proposal(key_byte: u8) -> Option<RulesData> {
    request(
        &format!("v{key_byte}"),
        key_byte,
        RulesPayload::SignBeaconProposal(SignBeaconProposalData {
            domain: vec![0; 32],
            slot: 64,
            proposer_index: 3,
            parent_root: vec![1; 32],
            state_root: vec![2; 32],
            body_root: vec![3; 32],
        }),
    )
}

pub fn lock_wallet() -> Option<RulesData> {
    Some(RulesData {
        wallet_name: "w1".into(),
        account_name: String::new(),
        pub_key: vec![],
        data: Some(RulesPayload::LockWallet(LockWalletData {})),
    })
}
