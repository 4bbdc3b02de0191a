//! Action kinds understood by the ruler.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulerError;

/// Requested operation. The wire name of each variant is its identifier
/// (`"Sign"`, `"LockWallet"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Sign,
    SignBeaconProposal,
    SignBeaconAttestation,
    /// Listing accounts; the rule hook is `on_list_accounts`.
    AccessAccount,
    LockWallet,
    UnlockWallet,
    LockAccount,
    UnlockAccount,
    CreateAccount,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Sign,
        Action::SignBeaconProposal,
        Action::SignBeaconAttestation,
        Action::AccessAccount,
        Action::LockWallet,
        Action::UnlockWallet,
        Action::LockAccount,
        Action::UnlockAccount,
        Action::CreateAccount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Sign => "Sign",
            Action::SignBeaconProposal => "SignBeaconProposal",
            Action::SignBeaconAttestation => "SignBeaconAttestation",
            Action::AccessAccount => "AccessAccount",
            Action::LockWallet => "LockWallet",
            Action::UnlockWallet => "UnlockWallet",
            Action::LockAccount => "LockAccount",
            Action::UnlockAccount => "UnlockAccount",
            Action::CreateAccount => "CreateAccount",
        }
    }

    /// Signing actions mutate slashing-protection state for their key and
    /// must hold the key lock for the whole evaluation.
    pub fn requires_lock(self) -> bool {
        matches!(
            self,
            Action::Sign | Action::SignBeaconProposal | Action::SignBeaconAttestation
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = RulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| RulerError::UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parse_round_trips_every_name() {
        for a in Action::ALL {
            assert_eq!(a.as_str().parse::<Action>().unwrap(), a);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "sign".parse::<Action>().unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_ACTION");
    }

    #[test]
    fn only_signing_actions_lock() {
        let locking: Vec<Action> = Action::ALL.into_iter().filter(|a| a.requires_lock()).collect();
        assert_eq!(
            locking,
            vec![Action::Sign, Action::SignBeaconProposal, Action::SignBeaconAttestation]
        );
    }
}
