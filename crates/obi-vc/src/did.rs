//! # did:web identifier construction
//!
//! Deterministic `did:web:` strings for organizations, signing keys, and
//! credential subjects, plus the DID documents that make them resolvable.
//!
//! The DID's own path delimiter is `:`, so a colon appearing *inside* the
//! method-specific identifier (e.g. a domain with a port) or inside a path
//! segment must be percent-encoded. Subject DIDs carry the user id as a
//! base64url path segment so it can be recovered by decoding the final
//! segment.
//!
//! Everything here is a pure function over its inputs; there is no I/O
//! and no dispatch — DID variants are parameter composition, nothing more.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use obi_core::{Organization, SigningKey, UserId};

/// The only DID method this system issues.
pub const DID_METHOD_WEB: &str = "web";

/// Fragment labeling an organization's signing key.
pub const KEY_FRAGMENT: &str = "key-0";

/// Path namespace under which subject DIDs carry the user id.
const SUBJECT_NAMESPACE: &str = "u";

/// Percent-encode the characters that would collide with the DID's own
/// delimiters (`:` between segments) or break reversibility (`%`).
fn escape_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for ch in segment.chars() {
        match ch {
            '%' | ':' | '/' | '?' | '#' => {
                out.push('%');
                out.push_str(&format!("{:02X}", ch as u32));
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Assemble a DID string from its parts.
///
/// Path segments are joined with `:` (the DID path delimiter), query
/// parameters are URL-encoded and appended with `?`, and a fragment is
/// appended with `#` after any query.
pub fn assemble_did(
    method: &str,
    method_specific_id: &str,
    path_segments: &[&str],
    query: &[(&str, &str)],
    fragment: Option<&str>,
) -> String {
    let mut did = format!("did:{method}:{}", escape_segment(method_specific_id));

    for segment in path_segments {
        did.push(':');
        did.push_str(&escape_segment(segment));
    }

    if !query.is_empty() {
        let encoded: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter().copied())
            .finish();
        did.push('?');
        did.push_str(&encoded);
    }

    if let Some(fragment) = fragment {
        did.push('#');
        did.push_str(fragment);
    }

    did
}

/// The organization's own DID: `did:web:<domain>`.
pub fn organization_did(organization: &Organization) -> String {
    assemble_did(DID_METHOD_WEB, &organization.domain, &[], &[], None)
}

/// The DID of an organization's signing key: `did:web:<domain>#key-0`.
pub fn key_did(organization: &Organization, _key: &SigningKey) -> String {
    assemble_did(
        DID_METHOD_WEB,
        &organization.domain,
        &[],
        &[],
        Some(KEY_FRAGMENT),
    )
}

/// The DID of a claim subject: `did:web:<domain>:u:<base64url(user id)>`.
///
/// The final path segment is reversible — see [`user_id_from_subject_did`].
pub fn credential_subject_did(organization: &Organization, user_id: &UserId) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(user_id.as_str().as_bytes());
    assemble_did(
        DID_METHOD_WEB,
        &organization.domain,
        &[SUBJECT_NAMESPACE, &encoded],
        &[],
        None,
    )
}

/// Recover the user id from a subject DID by decoding its final path
/// segment. Returns `None` for DIDs that do not carry a decodable id.
pub fn user_id_from_subject_did(did: &str) -> Option<UserId> {
    let last = did.rsplit(':').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(last).ok()?;
    let id = String::from_utf8(bytes).ok()?;
    Some(UserId::new(id))
}

/// A verification method entry in a DID document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// DID URL of the key.
    pub id: String,
    /// DID of the controller (the organization).
    pub controller: String,
    /// Key type tag.
    #[serde(rename = "type")]
    pub method_type: String,
    /// Whether this key has been revoked.
    pub revoked: bool,
    /// The public key, multibase-encoded.
    #[serde(rename = "publicKeyMultibase")]
    pub public_key_multibase: String,
}

/// A resolvable DID document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidDocument {
    /// JSON-LD contexts.
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// The DID this document describes.
    pub id: String,
    /// Keys attached to the DID.
    #[serde(rename = "verificationMethod")]
    pub verification_method: Vec<VerificationMethod>,
    /// DID URLs usable for assertion proofs.
    #[serde(rename = "assertionMethod")]
    pub assertion_method: Vec<String>,
}

/// Build the organization's DID document from its signing keys.
///
/// Private key material never enters the document.
pub fn organization_did_document(
    organization: &Organization,
    keys: &[SigningKey],
) -> DidDocument {
    let did = organization_did(organization);
    let verification_method = keys
        .iter()
        .map(|key| VerificationMethod {
            id: format!("{did}#{KEY_FRAGMENT}"),
            controller: did.clone(),
            method_type: "Ed25519VerificationKey2020".to_string(),
            revoked: key.revoked,
            public_key_multibase: key.public_key_multibase.clone(),
        })
        .collect();

    DidDocument {
        context: vec![
            crate::contexts::DID_V1_URL.to_string(),
            crate::contexts::ED25519_2020_V1_URL.to_string(),
        ],
        id: did.clone(),
        verification_method,
        assertion_method: vec![format!("{did}#{KEY_FRAGMENT}")],
    }
}

/// A minimal DID document stub for a claim subject.
pub fn subject_did_document(organization: &Organization, user_id: &UserId) -> DidDocument {
    DidDocument {
        context: vec![crate::contexts::DID_V1_URL.to_string()],
        id: credential_subject_did(organization, user_id),
        verification_method: Vec::new(),
        assertion_method: Vec::new(),
    }
}
