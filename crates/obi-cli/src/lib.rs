//! # obi-cli — CLI tool for the Open Badge Issuer stack
//!
//! Provides the `obi` command-line interface for key and credential
//! operations that run outside the API service:
//!
//! - `obi keygen` — generate an Ed25519 issuer keypair as multibase
//!   strings ready to load into the `signing_keys` table.
//! - `obi sign` — sign a credential document with a keypair file.
//! - `obi verify` — check a signed credential against a public key.

pub mod keygen;
pub mod sign;
pub mod verify;
