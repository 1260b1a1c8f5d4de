//! # Credential proof
//!
//! The cryptographic proof block attached to a signed credential. This
//! system supports exactly one signature suite (Ed25519Signature2020) and
//! one proof purpose (`assertionMethod`), so the proof is a rigid struct
//! rather than a negotiable family of types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The one signature suite this system produces.
pub const PROOF_TYPE_ED25519_2020: &str = "Ed25519Signature2020";

/// The one proof purpose this system produces.
pub const PROOF_PURPOSE_ASSERTION: &str = "assertionMethod";

/// A cryptographic proof on a signed credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    /// Signature suite identifier.
    #[serde(rename = "type")]
    pub proof_type: String,

    /// When the proof was created (UTC). Doubles as the credential
    /// cache's freshness timestamp.
    pub created: DateTime<Utc>,

    /// DID URL of the signing key.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    /// Purpose of the proof.
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: String,

    /// Multibase-encoded (base58btc, `z` prefix) Ed25519 signature.
    #[serde(rename = "proofValue")]
    pub proof_value: String,
}

impl Proof {
    /// Build an Ed25519Signature2020 assertion proof.
    pub fn new(verification_method: String, proof_value: String, created: DateTime<Utc>) -> Self {
        Self {
            proof_type: PROOF_TYPE_ED25519_2020.to_string(),
            created,
            verification_method,
            proof_purpose: PROOF_PURPOSE_ASSERTION.to_string(),
            proof_value,
        }
    }
}
