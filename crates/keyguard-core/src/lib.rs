//! keyguard core: request types, action kinds, and the shared error surface.
//!
//! This crate defines the data contracts exchanged between the ruler service
//! and its collaborators (rule engines, lock managers, upstream
//! authentication). It carries no runtime dependencies so rule engines can be
//! written against it without pulling in tokio.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed requests surface as `RulerError`/`Result` instead of crashing
//! the signer.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod action;
pub mod error;
pub mod pubkey;
pub mod rules;

/// Shared result type.
pub use error::{Result, RulerError};

pub use action::Action;
pub use pubkey::{PubKey, PUBKEY_LEN};
