//! Action × payload routing to rule hooks.

use keyguard_core::error::{Result, RulerError};
use keyguard_core::rules::{ReqMetadata, RuleResult, RulesPayload};
use keyguard_core::Action;

use crate::context::Context;
use crate::rules::Rules;

/// Invoke the hook for `action`, provided `payload` is the variant that
/// action expects. A hook answering `Unknown` breaks the rule contract and
/// is reported as `UnknownResult`.
pub async fn dispatch(
    rules: &dyn Rules,
    ctx: &Context,
    action: Action,
    metadata: &ReqMetadata,
    payload: &RulesPayload,
) -> Result<RuleResult> {
    let result = match (action, payload) {
        (Action::Sign, RulesPayload::Sign(req)) => rules.on_sign(ctx, metadata, req).await,
        (Action::SignBeaconProposal, RulesPayload::SignBeaconProposal(req)) => {
            rules.on_sign_beacon_proposal(ctx, metadata, req).await
        }
        (Action::SignBeaconAttestation, RulesPayload::SignBeaconAttestation(req)) => {
            rules.on_sign_beacon_attestation(ctx, metadata, req).await
        }
        (Action::AccessAccount, RulesPayload::AccessAccount(req)) => {
            rules.on_list_accounts(ctx, metadata, req).await
        }
        (Action::LockWallet, RulesPayload::LockWallet(req)) => {
            rules.on_lock_wallet(ctx, metadata, req).await
        }
        (Action::UnlockWallet, RulesPayload::UnlockWallet(req)) => {
            rules.on_unlock_wallet(ctx, metadata, req).await
        }
        (Action::LockAccount, RulesPayload::LockAccount(req)) => {
            rules.on_lock_account(ctx, metadata, req).await
        }
        (Action::UnlockAccount, RulesPayload::UnlockAccount(req)) => {
            rules.on_unlock_account(ctx, metadata, req).await
        }
        (Action::CreateAccount, RulesPayload::CreateAccount(req)) => {
            rules.on_create_account(ctx, metadata, req).await
        }
        (action, payload) => {
            return Err(RulerError::UnexpectedData { action, got: payload.action() });
        }
    };

    if result == RuleResult::Unknown {
        return Err(RulerError::UnknownResult);
    }
    Ok(result)
}
