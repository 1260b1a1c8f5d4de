//! # obi-crypto — Cryptographic Primitives for the Open Badge Issuer Stack
//!
//! Building blocks for credential signing:
//!
//! - **Ed25519** signing and verification over
//!   [`CanonicalBytes`](obi_core::CanonicalBytes), with key material in
//!   multibase form (base58btc, multicodec-prefixed).
//! - **Recipient identity hashing** — salted SHA-256 digests so signed
//!   documents never carry a plaintext email address.
//!
//! ## Security Invariants
//!
//! - Signing APIs accept `&CanonicalBytes` only; raw byte slices are not
//!   accepted anywhere in the signing path.
//! - Private key bytes are zeroized when an [`IssuerKeyPair`] is dropped
//!   and are never cached beyond one signing call.
//! - Identity salts come fresh from the OS random source on every call.

pub mod ed25519;
pub mod error;
pub mod identity;
pub mod multibase;

// Re-export primary types.
pub use ed25519::{bytes_to_hex, verify_multibase, IssuerKeyPair};
pub use error::CryptoError;
pub use identity::{
    hash_identity, hash_identity_with_salt, HashedIdentity, IDENTITY_HASH_ORDER,
    IDENTITY_SALT_BYTES,
};
pub use multibase::{
    multibase_decode, multibase_encode, MULTICODEC_ED25519_PRIV, MULTICODEC_ED25519_PUB,
};
