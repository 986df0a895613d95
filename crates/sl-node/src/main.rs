//! # Shortlink Node
//!
//! Loads configuration from `SL_*` environment variables, wires the minting
//! service and runs a shorten/resolve pass over the URLs given as arguments.
//!
//! ```text
//! SL_CODE_LENGTH=6 sl-node https://example.com/a https://example.com/b
//! ```

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use sl_01_code_minting::{MintError, ShortlinkConfig};
use sl_node::{init_tracing, ShortlinkNode};

const ORIGIN: &str = "cli";

#[tokio::main]
async fn main() -> Result<()> {
    let config = ShortlinkConfig::from_env().context("Invalid configuration")?;
    init_tracing(&config).context("Failed to initialize tracing")?;

    let node = ShortlinkNode::new(config);
    node.start().await.context("Failed to seed membership filter")?;

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        warn!("No URLs given, nothing to shorten");
    }

    let mut minted = Vec::with_capacity(urls.len());
    for url in &urls {
        match node.service().shorten(url, ORIGIN).await {
            Ok(code) => minted.push(code),
            Err(MintError::GenerationExhausted { attempts }) => {
                error!(url = %url, attempts = attempts, "Code space congested, try again later");
            }
            Err(MintError::InvalidUrl) => warn!("Skipping empty URL"),
            Err(e) => return Err(e).with_context(|| format!("Failed to shorten {}", url)),
        }
    }

    for code in &minted {
        let resolved = node
            .service()
            .resolve(code.short_code())
            .await
            .with_context(|| format!("Failed to resolve {}", code.short_code()))?;
        match resolved {
            Some(url) => println!("{} -> {}", code.short_code(), url),
            None => warn!(short_code = code.short_code(), "Minted code did not resolve"),
        }
    }

    let snapshot = node.metrics();
    info!(
        minted = snapshot.codes_minted,
        candidates = snapshot.candidates_generated,
        retries = snapshot.retries(),
        false_positives = snapshot.false_positives,
        filter_errors = snapshot.filter_errors,
        verification_rate = snapshot.verification_rate(),
        "Session complete"
    );

    Ok(())
}
