//! keyguard-ruler: evaluate one batch file against the static rule table.
//!
//! Usage: `keyguard-ruler <config.yaml> <batch.json>`
//! - Strict config parsing + validate
//! - One result name per request on stdout, in request order
//! - `RUST_LOG` controls tracing output (stderr)

use std::sync::Arc;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use keyguard_core::error::{Result, RulerError};
use keyguard_core::rules::{Credentials, RulesData};
use keyguard_ruler::{config, Context, MemLocker, Service, StaticRules};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchFile {
    #[serde(default)]
    credentials: Option<Credentials>,
    action: String,
    #[serde(default)]
    requests: Vec<Option<RulesData>>,
}

fn load_batch(path: &str) -> Result<BatchFile> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| RulerError::Internal(format!("read batch failed: {e}")))?;
    serde_json::from_str(&s).map_err(|e| RulerError::BadRequest(format!("invalid batch: {e}")))
}

async fn run(cfg_path: &str, batch_path: &str) -> Result<()> {
    let cfg = config::load_from_file(cfg_path)?;
    let batch = load_batch(batch_path)?;

    let service = Service::new(
        &cfg.ruler,
        Arc::new(MemLocker::new()),
        Arc::new(StaticRules::from_config(&cfg.rules)),
    );

    let results = service
        .run_rules(
            &Context::background(),
            batch.credentials.as_ref(),
            &batch.action,
            &batch.requests,
        )
        .await;

    for r in results {
        println!("{r}");
    }
    tracing::debug!(metrics = %service.metrics().render(), "batch complete");
    Ok(())
}

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let (Some(cfg_path), Some(batch_path)) = (args.get(1), args.get(2)) else {
        eprintln!("usage: keyguard-ruler <config.yaml> <batch.json>");
        std::process::exit(2);
    };

    if let Err(err) = run(cfg_path, batch_path).await {
        tracing::error!(err = %err, code = err.code(), "keyguard-ruler failed");
        std::process::exit(1);
    }
}
