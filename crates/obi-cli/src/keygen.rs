//! # Keygen subcommand
//!
//! Generates an Ed25519 keypair and emits it as the JSON shape the
//! signing-key store expects: `publicKeyMultibase` and
//! `privateKeyMultibase`, both base58btc multibase with the standard
//! multicodec headers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use obi_crypto::IssuerKeyPair;

/// Arguments for the `obi keygen` subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Write the keypair JSON to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Generate a keypair and write it out.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    let pair = IssuerKeyPair::generate();
    let keypair = serde_json::json!({
        "publicKeyMultibase": pair.public_key_multibase(),
        "privateKeyMultibase": pair.private_key_multibase(),
    });
    let rendered = serde_json::to_string_pretty(&keypair)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing keypair to {}", path.display()))?;
            tracing::info!(path = %path.display(), "keypair written");
        }
        None => println!("{rendered}"),
    }
    Ok(0)
}
