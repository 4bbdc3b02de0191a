//! Shared error type across keyguard crates.
//!
//! None of these errors cross the batch boundary: the ruler converts every
//! variant into a `FAILED` result for the affected slot(s). The stable
//! `code()` string is what ends up in logs and metric labels.

use thiserror::Error;

use crate::action::Action;

/// Shared result type.
pub type Result<T> = std::result::Result<T, RulerError>;

/// Unified error type used by core and ruler.
#[derive(Debug, Error)]
pub enum RulerError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("no rules data entries")]
    EmptyBatch,
    #[error("batch of {len} entries exceeds limit of {max}")]
    BatchTooLarge { len: usize, max: usize },
    #[error("no pubkey in rules data")]
    NoPubKey,
    #[error("invalid pubkey length {0}")]
    InvalidPubKey(usize),
    #[error("multiple requests for same key {0}")]
    DuplicatePubKey(String),
    #[error("no credentials")]
    NoCredentials,
    #[error("no client in credentials")]
    NoClient,
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("data not of expected type: action {action} received {got} data")]
    UnexpectedData { action: Action, got: Action },
    #[error("unknown result from rule")]
    UnknownResult,
    #[error("rule evaluation timed out")]
    HookTimeout,
    #[error("cancelled")]
    Cancelled,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl RulerError {
    /// Stable code used in log fields and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            RulerError::BadRequest(_) => "BAD_REQUEST",
            RulerError::EmptyBatch => "EMPTY_BATCH",
            RulerError::BatchTooLarge { .. } => "BATCH_TOO_LARGE",
            RulerError::NoPubKey => "NO_PUBKEY",
            RulerError::InvalidPubKey(_) => "INVALID_PUBKEY",
            RulerError::DuplicatePubKey(_) => "DUPLICATE_PUBKEY",
            RulerError::NoCredentials => "NO_CREDENTIALS",
            RulerError::NoClient => "NO_CLIENT",
            RulerError::UnknownAction(_) => "UNKNOWN_ACTION",
            RulerError::UnexpectedData { .. } => "UNEXPECTED_DATA",
            RulerError::UnknownResult => "UNKNOWN_RESULT",
            RulerError::HookTimeout => "HOOK_TIMEOUT",
            RulerError::Cancelled => "CANCELLED",
            RulerError::UnsupportedVersion => "UNSUPPORTED_VERSION",
            RulerError::Internal(_) => "INTERNAL",
        }
    }
}
