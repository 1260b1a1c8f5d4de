//! # Sign subcommand
//!
//! Signs a credential document from a file with a keypair produced by
//! `obi keygen`. Contexts resolve through the same pinned-first loader
//! the API service uses, so signing works offline for the bundled
//! contexts and fails loudly for anything unreachable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use obi_crypto::IssuerKeyPair;
use obi_vc::{AchievementCredential, ContextStore, DocumentLoader, Ed25519Suite};

/// Arguments for the `obi sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Unsigned credential JSON file.
    pub credential: PathBuf,

    /// Keypair JSON file (`obi keygen` output).
    #[arg(long)]
    pub key: PathBuf,

    /// DID URL to name as the proof's verification method,
    /// e.g. `did:web:badges.example.com#key-0`.
    #[arg(long)]
    pub verification_method: String,

    /// Write the signed credential to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Sign the credential and write it out.
pub fn run_sign(args: &SignArgs) -> Result<u8> {
    let raw = std::fs::read_to_string(&args.credential)
        .with_context(|| format!("reading credential {}", args.credential.display()))?;
    let credential: AchievementCredential =
        serde_json::from_str(&raw).context("parsing credential JSON")?;

    let key_raw = std::fs::read_to_string(&args.key)
        .with_context(|| format!("reading keypair {}", args.key.display()))?;
    let key_json: serde_json::Value = serde_json::from_str(&key_raw).context("parsing keypair")?;
    let private = key_json["privateKeyMultibase"]
        .as_str()
        .context("keypair file has no privateKeyMultibase")?;
    let pair = IssuerKeyPair::from_multibase(private)?;

    let suite = Ed25519Suite::new(pair, args.verification_method.clone());
    let loader = DocumentLoader::new(ContextStore::bundled());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let signed = runtime.block_on(suite.sign(&credential, &loader))?;

    let rendered = serde_json::to_string_pretty(&signed)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing signed credential to {}", path.display()))?;
            tracing::info!(path = %path.display(), "signed credential written");
        }
        None => println!("{rendered}"),
    }
    Ok(0)
}
