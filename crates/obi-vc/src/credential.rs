//! # Achievement credential document
//!
//! The typed Open Badges 3.0 credential envelope and its builder. Field
//! names follow the W3C / Open Badges JSON vocabulary via serde renames;
//! the envelope is rigid while the proof is attached separately by the
//! signing suite.
//!
//! For fixed inputs the builder's output is byte-for-byte reproducible
//! except for the hashed-identity object, whose salt is freshly drawn on
//! every call by design.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use obi_core::{Achievement, AchievementClaim, CanonicalBytes, Organization, User};
use obi_crypto::hash_identity;

use crate::contexts::{CREDENTIALS_V1_URL, OPEN_BADGES_V3_URL};
use crate::did::{credential_subject_did, organization_did};
use crate::error::IssueError;
use crate::proof::Proof;

/// Issuer block derived from the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerProfile {
    /// The organization's DID.
    pub id: String,
    /// Type tag, always `Profile`.
    #[serde(rename = "type")]
    pub profile_type: String,
    /// Organization display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Public description.
    pub description: String,
}

/// Award criteria: at least one of `id` / `narrative` is present, per the
/// achievement record's invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// URL describing the criteria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Narrative text describing the criteria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

/// The achievement block inside the credential subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementBlock {
    /// Hosted achievement URL on the organization's domain.
    pub id: String,
    /// Type tag, always `Achievement`.
    #[serde(rename = "type")]
    pub achievement_type: String,
    /// Achievement display name.
    pub name: String,
    /// Description of the accomplishment.
    pub description: String,
    /// Award criteria.
    pub criteria: Criteria,
}

/// A salted-hash recipient identity, in place of the plaintext email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityObject {
    /// Type tag, always `IdentityObject`.
    #[serde(rename = "type")]
    pub identity_type_tag: String,
    /// Always true; this system never embeds plaintext identities.
    pub hashed: bool,
    /// Algorithm-tagged digest of `identifier + salt`.
    #[serde(rename = "identityHash")]
    pub identity_hash: String,
    /// Kind of identity that was hashed.
    #[serde(rename = "identityType")]
    pub identity_kind: String,
    /// The salt the digest was computed with.
    pub salt: String,
}

/// The credential subject: who earned what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSubject {
    /// The subject's DID (reversible to the user id).
    pub id: String,
    /// Type tag, always `AchievementSubject`.
    #[serde(rename = "type")]
    pub subject_type: String,
    /// Exactly one hashed identity object.
    pub identifier: Vec<IdentityObject>,
    /// The achievement that was earned.
    pub achievement: AchievementBlock,
}

/// An Open Badges 3.0 achievement credential, unsigned until the signing
/// suite attaches a proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementCredential {
    /// The two fixed context URLs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// Stable document id: `urn:uuid:<claim id>`.
    pub id: String,
    /// Type tags.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,
    /// Issuer block.
    pub issuer: IssuerProfile,
    /// The claim's `valid_from`, ISO-8601.
    #[serde(rename = "issuanceDate")]
    pub issuance_date: DateTime<Utc>,
    /// Subject block.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: CredentialSubject,
    /// Attached by the signing suite; absent on unsigned documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl AchievementCredential {
    /// The canonical signing input: this credential with the `proof`
    /// member removed, canonicalized.
    pub fn signing_input(&self) -> Result<CanonicalBytes, IssueError> {
        let mut value = serde_json::to_value(self)
            .map_err(obi_core::CanonicalizationError::from)?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("proof");
        }
        Ok(CanonicalBytes::from_value(value)?)
    }
}

/// Build the unsigned credential for a claim.
///
/// The caller guarantees `claim.valid_from` is set (the claim became
/// authoritative before this point); the builder never fabricates a
/// validity date and only falls back to the current time when invoked
/// outside the normal flow.
///
/// Fails with [`IssueError::MissingEmailIdentifier`] when the user has no
/// verified EMAIL identifier to hash into the subject.
pub fn build_credential(
    claim: &AchievementClaim,
    achievement: &Achievement,
    organization: &Organization,
    user: &User,
) -> Result<AchievementCredential, IssueError> {
    let email = user
        .verified_email()
        .ok_or(IssueError::MissingEmailIdentifier)?;
    let hashed = hash_identity(email);

    Ok(AchievementCredential {
        context: vec![
            CREDENTIALS_V1_URL.to_string(),
            OPEN_BADGES_V3_URL.to_string(),
        ],
        id: format!("urn:uuid:{}", claim.id),
        credential_type: vec![
            "VerifiableCredential".to_string(),
            "OpenBadgeCredential".to_string(),
        ],
        issuer: IssuerProfile {
            id: organization_did(organization),
            profile_type: "Profile".to_string(),
            name: organization.name.clone(),
            email: organization.email.clone(),
            description: organization.description.clone(),
        },
        issuance_date: claim.valid_from.unwrap_or_else(Utc::now),
        credential_subject: CredentialSubject {
            id: credential_subject_did(organization, &user.id),
            subject_type: "AchievementSubject".to_string(),
            identifier: vec![IdentityObject {
                identity_type_tag: "IdentityObject".to_string(),
                hashed: true,
                identity_hash: hashed.hash,
                identity_kind: "emailAddress".to_string(),
                salt: hashed.salt,
            }],
            achievement: AchievementBlock {
                id: format!(
                    "https://{}/achievements/{}",
                    organization.domain, achievement.id
                ),
                achievement_type: "Achievement".to_string(),
                name: achievement.name.clone(),
                description: achievement.description.clone(),
                criteria: Criteria {
                    id: achievement.criteria_id.clone(),
                    narrative: achievement.criteria_narrative.clone(),
                },
            },
        },
        proof: None,
    })
}
