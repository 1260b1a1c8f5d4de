//! # Recipient identity hashing
//!
//! Salted one-way digests of a recipient identifier (usually an email
//! address), so a signed credential or hosted assertion never carries the
//! plaintext identifier. A verifier who knows the plaintext recomputes
//! `sha256(identifier + salt)` and compares.
//!
//! The same recipe is used by both credential formats; the concatenation
//! order is fixed by the documented constant below and must not change
//! while previously issued documents are still being verified.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ed25519::bytes_to_hex;

/// Entropy of a freshly generated salt, before text encoding.
pub const IDENTITY_SALT_BYTES: usize = 20;

/// Digest input order: the plaintext identifier first, then the salt.
pub const IDENTITY_HASH_ORDER: &str = "identifier+salt";

/// A salted, one-way representation of a recipient identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedIdentity {
    /// Algorithm-tagged digest, e.g. `sha256$3a91…`.
    pub hash: String,
    /// The base64-encoded salt the digest was computed with.
    pub salt: String,
}

/// Hash a recipient identifier with a fresh random salt.
///
/// Every call draws a new [`IDENTITY_SALT_BYTES`]-byte salt from the OS
/// random source; salts are never reused or derived from prior state.
/// Empty identifiers are the caller's responsibility to reject upstream.
pub fn hash_identity(identifier: &str) -> HashedIdentity {
    let mut salt_bytes = [0u8; IDENTITY_SALT_BYTES];
    OsRng.fill_bytes(&mut salt_bytes);
    let salt = STANDARD.encode(salt_bytes);

    hash_identity_with_salt(identifier, &salt)
}

/// Hash a recipient identifier with a caller-provided salt.
///
/// Exists for verification and for tests that need a fixed salt; issuance
/// paths go through [`hash_identity`].
pub fn hash_identity_with_salt(identifier: &str, salt: &str) -> HashedIdentity {
    let mut hasher = Sha256::new();
    hasher.update(identifier.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = hasher.finalize();

    HashedIdentity {
        hash: format!("sha256${}", bytes_to_hex(&digest)),
        salt: salt.to_string(),
    }
}
