//! # Ed25519 signing and verification
//!
//! Wraps `ed25519-dalek` behind the workspace conventions: signing input
//! is always [`CanonicalBytes`], key material travels in multibase form,
//! and signature values are multibase base58btc (`z` prefix) as used by
//! the Ed25519Signature2020 suite.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand_core::OsRng;

use obi_core::CanonicalBytes;

use crate::error::CryptoError;
use crate::multibase::{
    multibase_decode, multibase_encode, MULTICODEC_ED25519_PRIV, MULTICODEC_ED25519_PUB,
};

/// An Ed25519 key pair held for the duration of one signing call.
///
/// The inner `ed25519_dalek::SigningKey` zeroizes its bytes on drop, so
/// private material does not outlive the pair.
pub struct IssuerKeyPair {
    signing_key: SigningKey,
}

impl IssuerKeyPair {
    /// Generate a fresh key pair from the OS random source.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Reconstruct a key pair from a `privateKeyMultibase` string.
    pub fn from_multibase(private_key_multibase: &str) -> Result<Self, CryptoError> {
        let bytes = multibase_decode(MULTICODEC_ED25519_PRIV, private_key_multibase)?;
        let seed: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength(bytes.len()))?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// The public half, multibase-encoded.
    pub fn public_key_multibase(&self) -> String {
        multibase_encode(
            MULTICODEC_ED25519_PUB,
            self.signing_key.verifying_key().as_bytes(),
        )
    }

    /// The private half, multibase-encoded. Only used when exporting a
    /// newly generated key pair for storage.
    pub fn private_key_multibase(&self) -> String {
        multibase_encode(MULTICODEC_ED25519_PRIV, self.signing_key.as_bytes())
    }

    /// Sign canonical bytes, returning the multibase (`z` base58btc)
    /// signature value.
    pub fn sign_to_multibase(&self, data: &CanonicalBytes) -> String {
        let signature = self.signing_key.sign(data.as_bytes());
        format!("z{}", bs58::encode(signature.to_bytes()).into_string())
    }
}

impl std::fmt::Debug for IssuerKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print private material.
        f.debug_struct("IssuerKeyPair")
            .field("public_key_multibase", &self.public_key_multibase())
            .finish()
    }
}

/// Verify a multibase signature value over canonical bytes against a
/// `publicKeyMultibase` string.
pub fn verify_multibase(
    public_key_multibase: &str,
    data: &CanonicalBytes,
    signature_multibase: &str,
) -> Result<(), CryptoError> {
    let key_bytes = multibase_decode(MULTICODEC_ED25519_PUB, public_key_multibase)?;
    let key_array: [u8; 32] = key_bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength(key_bytes.len()))?;
    let verifying_key = VerifyingKey::from_bytes(&key_array)
        .map_err(|e| CryptoError::VerificationFailed(e.to_string()))?;

    let rest = signature_multibase
        .strip_prefix('z')
        .ok_or_else(|| CryptoError::InvalidMultibasePrefix(signature_multibase.chars().next()))?;
    let sig_bytes = bs58::decode(rest)
        .into_vec()
        .map_err(|e| CryptoError::Base58Decode(e.to_string()))?;
    let sig_array: [u8; 64] = sig_bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidSignatureLength(sig_bytes.len()))?;

    verifying_key
        .verify(data.as_bytes(), &Signature::from_bytes(&sig_array))
        .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
}

/// Hex-encode bytes (lowercase, two digits per byte).
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // Writing to a String cannot fail.
        let _ = write!(out, "{b:02x}");
    }
    out
}
