//! # obi CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use obi_cli::keygen::{run_keygen, KeygenArgs};
use obi_cli::sign::{run_sign, SignArgs};
use obi_cli::verify::{run_verify, VerifyArgs};

/// Open Badge Issuer toolchain.
///
/// Key generation, credential signing, and proof verification for the
/// issuing stack, runnable outside the API service.
#[derive(Parser, Debug)]
#[command(name = "obi", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an Ed25519 issuer keypair as multibase strings.
    Keygen(KeygenArgs),

    /// Sign a credential document with a keypair file.
    Sign(SignArgs),

    /// Verify a signed credential against a public key.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Keygen(args) => run_keygen(&args),
        Commands::Sign(args) => run_sign(&args),
        Commands::Verify(args) => run_verify(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_keygen_with_output() {
        let cli = Cli::try_parse_from(["obi", "keygen", "--output", "keys.json"]).unwrap();
        match cli.command {
            Commands::Keygen(args) => {
                assert_eq!(args.output.unwrap().to_str().unwrap(), "keys.json")
            }
            other => panic!("parsed wrong subcommand: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_sign_requires_key_and_method() {
        assert!(Cli::try_parse_from(["obi", "sign", "credential.json"]).is_err());
        let cli = Cli::try_parse_from([
            "obi",
            "sign",
            "credential.json",
            "--key",
            "keys.json",
            "--verification-method",
            "did:web:badges.example.com#key-0",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Sign(_)));
    }

    #[test]
    fn cli_parse_verify() {
        let cli = Cli::try_parse_from([
            "obi",
            "verify",
            "signed.json",
            "--public-key",
            "z6MkpTHR8VNsBxYAAWHut2Geadd9jSwuBV8xRoAnwWsdvktH",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Verify(_)));
    }
}
