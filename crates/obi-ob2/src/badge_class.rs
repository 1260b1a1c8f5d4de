//! OB 2.0 badge class for an achievement.

use serde::{Deserialize, Serialize};

use obi_core::{Achievement, Organization};

use crate::constants::{achievement_definition_url, OB2_CONTEXT_URL, OB_VERSION_V3P0};
use crate::issuer::{issuer_from_organization, Ob2Issuer, RelatedResource};

/// Award criteria of a badge class. At least one of `id` / `narrative`
/// is present because the store refuses achievements without criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ob2Criteria {
    #[serde(rename = "type")]
    pub criteria_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

/// The hosted OB 2.0 badge class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeClass {
    /// Present only when served standalone; omitted when embedded in an
    /// assertion.
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(rename = "type")]
    pub class_type: String,
    /// Hosted URL of this badge class.
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub criteria: Ob2Criteria,
    /// Issuer profile, embedded without its own `@context`.
    pub issuer: Ob2Issuer,
    /// Cross-link to the 3.0 achievement document.
    pub related: Vec<RelatedResource>,
}

/// Build the hosted badge class for an achievement.
pub fn badge_class_from_achievement(
    achievement: &Achievement,
    organization: &Organization,
    embed_context: bool,
    protocol: &str,
) -> BadgeClass {
    let base = format!("{protocol}://{}", organization.domain);
    BadgeClass {
        context: embed_context.then(|| OB2_CONTEXT_URL.to_string()),
        class_type: "BadgeClass".to_string(),
        id: format!("{base}/ob2/b/{}", achievement.id),
        name: achievement.name.clone(),
        description: achievement.description.clone(),
        image: achievement.image.clone(),
        criteria: Ob2Criteria {
            criteria_type: "Criteria".to_string(),
            id: achievement.criteria_id.clone(),
            narrative: achievement.criteria_narrative.clone(),
        },
        issuer: issuer_from_organization(organization, false, protocol),
        related: vec![RelatedResource {
            resource_type: vec![achievement_definition_url()],
            id: format!("{base}/a/{}", achievement.id),
            same_as: None,
            version: OB_VERSION_V3P0.to_string(),
        }],
    }
}
