//! Serde adapter for byte fields carried as hex strings (optional `0x`).

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
    let raw = String::deserialize(d)?;
    let digits = raw.strip_prefix("0x").unwrap_or(&raw);
    hex::decode(digits).map_err(serde::de::Error::custom)
}
