//! OB 2.0 hosted badge assertion for a claim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use obi_core::{Achievement, AchievementClaim, Organization, User};
use obi_crypto::hash_identity;

use crate::badge_class::{badge_class_from_achievement, BadgeClass};
use crate::constants::{OB2_CONTEXT_URL, OB3_NAMESPACE, OB_VERSION_V3P0};
use crate::issuer::RelatedResource;

/// Salted hash of the recipient's email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(rename = "type")]
    pub recipient_type: String,
    /// `sha256$<hex>` over the identifier and salt.
    pub identity: String,
    pub hashed: bool,
    pub salt: String,
}

/// Hosted-badge verification marker. The assertion's own URL is the
/// verification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    #[serde(rename = "type")]
    pub verification_type: String,
}

/// The hosted OB 2.0 assertion document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeAssertion {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "type")]
    pub assertion_type: String,
    /// Hosted URL of this assertion.
    pub id: String,
    pub recipient: Recipient,
    pub evidence: Vec<Value>,
    #[serde(rename = "issuedOn")]
    pub issued_on: DateTime<Utc>,
    pub verification: Verification,
    /// Badge class embedded without its own `@context`.
    pub badge: BadgeClass,
    /// Cross-link to the 3.0 rendering of the same achievement.
    pub related: Vec<RelatedResource>,
}

/// Build the hosted assertion for a claim, or `None` when the claim must
/// not be public.
///
/// `None` is returned for an unaccepted or expired claim, a claim with no
/// `valid_from`, and a user with no verified email. The recipient salt is
/// drawn fresh on every call; it never matches the salt inside any signed
/// credential for the same claim.
pub fn badge_assertion_from_claim(
    claim: &AchievementClaim,
    achievement: &Achievement,
    organization: &Organization,
    user: &User,
    protocol: &str,
    now: DateTime<Utc>,
) -> Option<BadgeAssertion> {
    if !claim.is_shareable(now) {
        return None;
    }
    let email = user.verified_email()?;
    // is_shareable guarantees valid_from.
    let issued_on = claim.valid_from?;

    let identity = hash_identity(email);
    let base = format!("{protocol}://{}", organization.domain);
    Some(BadgeAssertion {
        context: OB2_CONTEXT_URL.to_string(),
        assertion_type: "Assertion".to_string(),
        id: format!("{base}/ob2/a/{}", claim.id),
        recipient: Recipient {
            recipient_type: "email".to_string(),
            identity: identity.hash,
            hashed: true,
            salt: identity.salt,
        },
        evidence: claim.evidence(),
        issued_on,
        verification: Verification {
            verification_type: "HostedBadge".to_string(),
        },
        badge: badge_class_from_achievement(achievement, organization, false, protocol),
        related: vec![RelatedResource {
            resource_type: vec![format!("{OB3_NAMESPACE}Achievement")],
            id: format!("{base}/a/{}", achievement.id),
            same_as: None,
            version: OB_VERSION_V3P0.to_string(),
        }],
    })
}
