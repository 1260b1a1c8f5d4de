//! # Credential pipeline error types
//!
//! One taxonomy for the whole build → sign → cache path. Variants map to
//! the caller-facing classes: not-found, not-shareable, configuration,
//! canonicalization/network, and store failures. The request layer owns
//! the translation to protocol responses; nothing here is swallowed or
//! partially recovered.

use thiserror::Error;

use obi_core::CanonicalizationError;
use obi_crypto::CryptoError;

use crate::cache::StoreError;

/// Errors from credential construction, signing, and caching.
#[derive(Error, Debug)]
pub enum IssueError {
    /// The user has no verified EMAIL identifier to hash into the
    /// credential (not-found class).
    #[error("user has no verified email identifier")]
    MissingEmailIdentifier,

    /// The claim is not in a shareable state (forbidden class).
    #[error("claim {0} is not shareable")]
    NotShareable(String),

    /// No non-revoked signing key resolves for the organization
    /// (configuration class — missing setup, not a transient failure).
    #[error("organization {0} has no usable signing key")]
    NoSigningKey(String),

    /// The organization's key material could not be decoded
    /// (configuration class).
    #[error("signing key is unusable: {0}")]
    Key(#[from] CryptoError),

    /// Canonical serialization of the credential failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A `@context` URL could not be resolved; fatal for this signing
    /// attempt but safe to retry later.
    #[error("context resolution failed for {url}: {reason}")]
    ContextResolution {
        /// The URL that failed to resolve.
        url: String,
        /// Why resolution failed.
        reason: String,
    },

    /// The credential's proof is absent or not of a supported type.
    #[error("proof invalid: {0}")]
    InvalidProof(String),

    /// The credential cache store rejected the write.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),
}
