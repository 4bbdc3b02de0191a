//! Ruler config loader (strict parsing).

pub mod schema;

use std::fs;

use keyguard_core::error::{Result, RulerError};

pub use schema::{LockOrder, RulerConfig, RulerSection, RulesSection};

pub fn load_from_file(path: &str) -> Result<RulerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RulerError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RulerConfig> {
    let cfg: RulerConfig = serde_yaml::from_str(s)
        .map_err(|e| RulerError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
