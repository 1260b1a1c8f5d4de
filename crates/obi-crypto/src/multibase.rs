//! # Multibase key material
//!
//! Encoding and decoding of Ed25519 key bytes in the multibase form the
//! data store holds (`publicKeyMultibase` / `privateKeyMultibase`):
//! base58btc with the `z` multibase prefix, payload prefixed by the
//! standard multicodec header for the key kind.

use crate::error::CryptoError;

/// Multicodec header for an Ed25519 public key (varint of 0xed).
pub const MULTICODEC_ED25519_PUB: [u8; 2] = [0xed, 0x01];

/// Multicodec header for an Ed25519 private key (varint of 0x1300).
pub const MULTICODEC_ED25519_PRIV: [u8; 2] = [0x80, 0x26];

/// Encode bytes under a multicodec header as a multibase (`z` base58btc)
/// string.
pub fn multibase_encode(header: [u8; 2], bytes: &[u8]) -> String {
    let mut payload = Vec::with_capacity(2 + bytes.len());
    payload.extend_from_slice(&header);
    payload.extend_from_slice(bytes);
    format!("z{}", bs58::encode(payload).into_string())
}

/// Decode a multibase (`z` base58btc) string, checking and stripping the
/// expected multicodec header.
pub fn multibase_decode(header: [u8; 2], encoded: &str) -> Result<Vec<u8>, CryptoError> {
    let rest = encoded
        .strip_prefix('z')
        .ok_or_else(|| CryptoError::InvalidMultibasePrefix(encoded.chars().next()))?;

    let decoded = bs58::decode(rest)
        .into_vec()
        .map_err(|e| CryptoError::Base58Decode(e.to_string()))?;

    if decoded.len() < 2 {
        return Err(CryptoError::InvalidKeyLength(decoded.len()));
    }
    let found = [decoded[0], decoded[1]];
    if found != header {
        return Err(CryptoError::InvalidMulticodec {
            expected: header,
            found,
        });
    }

    Ok(decoded[2..].to_vec())
}
