//! OB 2.0 issuer profile for an organization.

use serde::{Deserialize, Serialize};

use obi_core::Organization;
use obi_vc::organization_did;

use crate::constants::{OB2_CONTEXT_URL, OB3_NAMESPACE, OB_VERSION_V3P0};

/// A cross-link from a hosted document to the same resource in another
/// Open Badges version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedResource {
    /// Vocabulary IRIs describing the linked resource.
    #[serde(rename = "type")]
    pub resource_type: Vec<String>,
    /// URL of the linked resource.
    pub id: String,
    /// Canonical identifier of the linked resource when it differs from
    /// the fetchable URL (e.g. a DID).
    #[serde(rename = "schema:sameAs", skip_serializing_if = "Option::is_none")]
    pub same_as: Option<String>,
    /// Version descriptor of the linked resource.
    pub version: String,
}

/// The hosted OB 2.0 issuer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ob2Issuer {
    /// Present only when the document is served standalone; omitted when
    /// embedded in a badge class.
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(rename = "type")]
    pub issuer_type: String,
    /// Hosted URL of this profile.
    pub id: String,
    pub name: String,
    pub email: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Cross-link to the 3.0 profile for the same organization.
    pub related: Vec<RelatedResource>,
}

/// Build the hosted issuer profile for an organization.
///
/// The `related` entry points at the organization's DID document URL, with
/// `schema:sameAs` carrying the DID itself.
pub fn issuer_from_organization(
    organization: &Organization,
    embed_context: bool,
    protocol: &str,
) -> Ob2Issuer {
    let base = format!("{protocol}://{}", organization.domain);
    Ob2Issuer {
        context: embed_context.then(|| OB2_CONTEXT_URL.to_string()),
        issuer_type: "Issuer".to_string(),
        id: format!("{base}/ob2/i"),
        name: organization.name.clone(),
        email: organization.email.clone(),
        description: organization.description.clone(),
        url: organization.url.clone(),
        related: vec![RelatedResource {
            resource_type: vec![format!("{OB3_NAMESPACE}Profile")],
            id: format!("{base}/.well-known/did.json"),
            same_as: Some(organization_did(organization)),
            version: OB_VERSION_V3P0.to_string(),
        }],
    }
}
