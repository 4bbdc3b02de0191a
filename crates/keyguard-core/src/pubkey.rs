//! Fixed-length public key identifier used as the lock key.

use std::fmt;

use crate::error::{Result, RulerError};

/// Length of a BLS12-381 public key.
pub const PUBKEY_LEN: usize = 48;

/// Public key identifier. Ordering is bytewise so a sorted lock order is canonical.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PubKey([u8; PUBKEY_LEN]);

impl PubKey {
    pub const fn new(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Empty input is `NoPubKey`; any other length mismatch is `InvalidPubKey`.
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        if raw.is_empty() {
            return Err(RulerError::NoPubKey);
        }
        let bytes: [u8; PUBKEY_LEN] = raw
            .try_into()
            .map_err(|_| RulerError::InvalidPubKey(raw.len()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; PUBKEY_LEN] {
        &self.0
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", HexBytes(&self.0))
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKey({self})")
    }
}

/// Hex formatter for log fields (`{:#x}` adds the `0x` prefix).
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::LowerHex for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn from_slice_checks_length() {
        assert!(matches!(PubKey::from_slice(&[]), Err(RulerError::NoPubKey)));
        assert!(matches!(
            PubKey::from_slice(&[1u8; 32]),
            Err(RulerError::InvalidPubKey(32))
        ));
        let key = PubKey::from_slice(&[7u8; PUBKEY_LEN]).unwrap();
        assert_eq!(key.as_bytes(), &[7u8; PUBKEY_LEN]);
    }

    #[test]
    fn display_is_prefixed_hex() {
        let mut raw = [0u8; PUBKEY_LEN];
        raw[0] = 0xab;
        let s = PubKey::new(raw).to_string();
        assert!(s.starts_with("0xab00"));
        assert_eq!(s.len(), 2 + PUBKEY_LEN * 2);
    }
}
