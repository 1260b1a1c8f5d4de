//! # Domain records
//!
//! The records the external data store hands to the credential pipeline.
//! Field names mirror the store's schema; identifiers are opaque strings
//! (the store allocates them), wrapped in distinct newtypes so a
//! [`ClaimId`] cannot be passed where an [`AchievementId`] is expected.
//!
//! Nothing here performs I/O — loading and persisting these records is an
//! external collaborator's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Helper macro for opaque string identifier newtypes.
macro_rules! string_id {
    ($(#[$doc:meta])* $ty:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $ty(String);

        impl $ty {
            /// Wrap a store-allocated identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Access the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of an [`Achievement`].
    AchievementId
);
string_id!(
    /// Identifier of an [`AchievementClaim`].
    ClaimId
);
string_id!(
    /// Identifier of an [`Organization`].
    OrganizationId
);
string_id!(
    /// Identifier of a [`SigningKey`].
    KeyId
);
string_id!(
    /// Identifier of a [`User`].
    UserId
);

/// Review status of an achievement claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Awarded but not yet accepted by the recipient.
    Unaccepted,
    /// Accepted by the recipient.
    Accepted,
    /// Rejected by the recipient.
    Rejected,
}

impl ClaimStatus {
    /// Store-facing string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unaccepted => "UNACCEPTED",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNACCEPTED" => Ok(Self::Unaccepted),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(format!("unknown claim status: {other}")),
        }
    }
}

/// Kind of a user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentifierType {
    /// An email address.
    Email,
    /// A web page under the user's control.
    Url,
    /// A phone number.
    Phone,
}

impl IdentifierType {
    /// Store-facing string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Url => "URL",
            Self::Phone => "PHONE",
        }
    }
}

impl std::str::FromStr for IdentifierType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMAIL" => Ok(Self::Email),
            "URL" => Ok(Self::Url),
            "PHONE" => Ok(Self::Phone),
            other => Err(format!("unknown identifier type: {other}")),
        }
    }
}

/// A typed identifier attached to a user.
///
/// Only a *verified* [`IdentifierType::Email`] identifier may become the
/// recipient identity of a credential or assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// Kind of identifier.
    #[serde(rename = "type")]
    pub identifier_type: IdentifierType,
    /// The identifier value (e.g. the email address).
    pub identifier: String,
    /// Whether ownership has been verified.
    pub verified: bool,
}

/// A claim subject: user id plus typed identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-allocated user id.
    pub id: UserId,
    /// Identifiers attached to this user.
    pub identifiers: Vec<Identifier>,
}

impl User {
    /// The user's first verified, well-formed email address, if any.
    ///
    /// Only identifiers passing [`is_plausible_email`] qualify; a verified
    /// row holding a malformed value never becomes a recipient identity.
    pub fn verified_email(&self) -> Option<&str> {
        self.identifiers
            .iter()
            .find(|i| {
                i.identifier_type == IdentifierType::Email
                    && i.verified
                    && is_plausible_email(&i.identifier)
            })
            .map(|i| i.identifier.as_str())
    }
}

/// Shape check for an email address: something before `@`, a dot after it,
/// and at least one character after the dot.
pub fn is_plausible_email(email: &str) -> bool {
    let Some(at) = email.find('@') else {
        return false;
    };
    let Some(dot) = email.rfind('.') else {
        return false;
    };
    at > 0 && dot > at && dot < email.len() - 1
}

/// Issuer identity: the organization that owns achievements and keys.
///
/// `domain` doubles as the DID method-specific identifier and the public
/// base URL for hosted documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Store-allocated organization id.
    pub id: OrganizationId,
    /// Domain name, e.g. `badges.example.com`.
    pub domain: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Public description.
    pub description: String,
    /// Optional public website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An asymmetric key pair scoped to one organization.
///
/// Key material is multibase-encoded (base58btc, `z` prefix) with the
/// standard multicodec headers for Ed25519 keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKey {
    /// Store-allocated key id.
    pub id: KeyId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Public key, multibase-encoded.
    pub public_key_multibase: String,
    /// Private key, multibase-encoded. Read only during a signing call,
    /// never retained across requests.
    pub private_key_multibase: String,
    /// Revoked keys are never used for signing.
    pub revoked: bool,
}

/// An awardable achievement definition.
///
/// At least one of `criteria_id` / `criteria_narrative` is present; the
/// store rejects achievements without criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Store-allocated achievement id.
    pub id: AchievementId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Description of the accomplishment.
    pub description: String,
    /// URL describing the award criteria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria_id: Option<String>,
    /// Narrative text describing the award criteria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria_narrative: Option<String>,
    /// Optional badge image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Achievement {
    /// Whether any criteria field is populated.
    pub fn has_criteria(&self) -> bool {
        self.criteria_id.is_some() || self.criteria_narrative.is_some()
    }
}

/// A free-form evidence entry attached to a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// URL of the evidence resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name of the evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Narrative describing the evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

/// An assertion that a specific user has (or is pending) an achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementClaim {
    /// Store-allocated claim id.
    pub id: ClaimId,
    /// The achievement being claimed.
    pub achievement_id: AchievementId,
    /// The claiming user.
    pub user_id: UserId,
    /// The organization the claim belongs to.
    pub organization_id: OrganizationId,
    /// Review status.
    pub claim_status: ClaimStatus,
    /// Set when the claim becomes authoritative; a claim without it must
    /// never be turned into a credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    /// Optional expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    /// Free-form evidence JSON: one evidence object or an array of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<serde_json::Value>,
}

impl AchievementClaim {
    /// Whether the claim may be shared publicly: accepted, authoritative
    /// (`valid_from` set), and not expired at `now`.
    pub fn is_shareable(&self, now: DateTime<Utc>) -> bool {
        self.claim_status == ClaimStatus::Accepted
            && self.valid_from.is_some()
            && !self.valid_until.is_some_and(|until| until < now)
    }

    /// Evidence normalized to a list, whether the store holds a single
    /// object or an array.
    pub fn evidence(&self) -> Vec<serde_json::Value> {
        match &self.json {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::Array(items)) => items.clone(),
            Some(other) => vec![other.clone()],
        }
    }
}
