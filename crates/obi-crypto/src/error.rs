//! # Cryptographic error types
//!
//! Structured errors for key decoding, signing, and verification.

use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The multibase string does not start with the `z` (base58btc) prefix.
    #[error("invalid multibase prefix: expected 'z', got {0:?}")]
    InvalidMultibasePrefix(Option<char>),

    /// The base58btc payload could not be decoded.
    #[error("base58 decode error: {0}")]
    Base58Decode(String),

    /// The decoded key does not carry the expected multicodec header.
    #[error("invalid multicodec header: expected {expected:02x?}, got {found:02x?}")]
    InvalidMulticodec {
        /// The header required for this key kind.
        expected: [u8; 2],
        /// The header actually present.
        found: [u8; 2],
    },

    /// The decoded key material has the wrong length.
    #[error("invalid Ed25519 key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The decoded signature has the wrong length.
    #[error("invalid Ed25519 signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Ed25519 signature verification failed.
    #[error("Ed25519 verification failed: {0}")]
    VerificationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multibase_prefix_display() {
        let err = CryptoError::InvalidMultibasePrefix(Some('m'));
        assert!(format!("{err}").contains('m'));
    }

    #[test]
    fn multicodec_display_names_both_headers() {
        let err = CryptoError::InvalidMulticodec {
            expected: [0xed, 0x01],
            found: [0x80, 0x26],
        };
        let msg = format!("{err}");
        assert!(msg.contains("ed"));
        assert!(msg.contains("80"));
    }

    #[test]
    fn key_length_display() {
        let err = CryptoError::InvalidKeyLength(16);
        let msg = format!("{err}");
        assert!(msg.contains("32"));
        assert!(msg.contains("16"));
    }
}
