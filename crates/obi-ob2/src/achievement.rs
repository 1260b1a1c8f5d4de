//! OB 3.0 achievement document for an achievement.
//!
//! The hosted counterpart of the achievement block embedded in signed
//! credentials, and the target of the `related` cross-links the 2.0
//! documents carry. Served at `/a/<achievement id>` on the organization's
//! domain.

use serde::{Deserialize, Serialize};

use obi_core::{Achievement, Organization};
use obi_vc::{organization_did, Criteria, IssuerProfile, OPEN_BADGES_V3_URL};

use crate::constants::{OB2_NAMESPACE, OB_VERSION_V2P0};
use crate::issuer::RelatedResource;

/// An image attached to a hosted 3.0 document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ob3Image {
    /// Type tag, always `Image`.
    #[serde(rename = "type")]
    pub image_type: String,
    /// URL of the image.
    pub id: String,
}

/// The hosted OB 3.0 achievement document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ob3Achievement {
    /// Present only when served standalone; omitted when embedded.
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(rename = "type")]
    pub achievement_type: String,
    /// Hosted URL of this document.
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Ob3Image>,
    pub criteria: Criteria,
    /// The issuing organization's profile, keyed by its DID.
    pub creator: IssuerProfile,
    /// Cross-link to the 2.0 badge class for the same achievement.
    pub related: Vec<RelatedResource>,
}

/// Build the hosted achievement document.
///
/// The `related` entry points back at the badge class URL, typed with the
/// 2.0 vocabulary term so consumers of either version can pair the two.
pub fn ob3_achievement_from_achievement(
    achievement: &Achievement,
    organization: &Organization,
    embed_context: bool,
    protocol: &str,
) -> Ob3Achievement {
    let base = format!("{protocol}://{}", organization.domain);
    Ob3Achievement {
        context: embed_context.then(|| OPEN_BADGES_V3_URL.to_string()),
        achievement_type: "Achievement".to_string(),
        id: format!("{base}/a/{}", achievement.id),
        name: achievement.name.clone(),
        description: achievement.description.clone(),
        image: achievement.image.as_ref().map(|url| Ob3Image {
            image_type: "Image".to_string(),
            id: url.clone(),
        }),
        criteria: Criteria {
            id: achievement.criteria_id.clone(),
            narrative: achievement.criteria_narrative.clone(),
        },
        creator: IssuerProfile {
            id: organization_did(organization),
            profile_type: "Profile".to_string(),
            name: organization.name.clone(),
            email: organization.email.clone(),
            description: organization.description.clone(),
        },
        related: vec![RelatedResource {
            resource_type: vec![
                "Related".to_string(),
                format!("{OB2_NAMESPACE}BadgeClass"),
            ],
            id: format!("{base}/ob2/b/{}", achievement.id),
            same_as: None,
            version: OB_VERSION_V2P0.to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge_class::tests::achievement;
    use crate::issuer::tests::organization;

    #[test]
    fn document_urls_are_under_the_org_domain() {
        let doc = ob3_achievement_from_achievement(&achievement(), &organization(), true, "https");
        assert_eq!(doc.id, "https://badges.example.com/a/a1");
        assert_eq!(doc.context.as_deref(), Some(OPEN_BADGES_V3_URL));
        assert_eq!(doc.achievement_type, "Achievement");
        assert_eq!(doc.creator.id, "did:web:badges.example.com");
    }

    #[test]
    fn related_links_the_badge_class_with_the_v2_vocabulary() {
        let doc = ob3_achievement_from_achievement(&achievement(), &organization(), true, "https");
        let related = &doc.related[0];
        assert_eq!(related.id, "https://badges.example.com/ob2/b/a1");
        assert_eq!(
            related.resource_type,
            vec![
                "Related".to_string(),
                "https://w3id.org/openbadges#BadgeClass".to_string()
            ]
        );
        assert_eq!(related.version, OB_VERSION_V2P0);
        assert!(related.same_as.is_none());
    }

    #[test]
    fn embedded_document_omits_context() {
        let doc = ob3_achievement_from_achievement(&achievement(), &organization(), false, "https");
        assert!(doc.context.is_none());
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("@context").is_none());
    }

    #[test]
    fn image_and_criteria_carry_over() {
        let doc = ob3_achievement_from_achievement(&achievement(), &organization(), true, "https");
        let image = doc.image.expect("fixture has an image");
        assert_eq!(image.image_type, "Image");
        assert_eq!(image.id, "https://badges.example.com/img/a1.png");
        assert_eq!(
            doc.criteria.narrative.as_deref(),
            Some("Weave one basket unaided")
        );
        assert!(doc.criteria.id.is_none());
    }

    #[test]
    fn badge_class_and_achievement_cross_links_pair_up() {
        let class = crate::badge_class_from_achievement(
            &achievement(),
            &organization(),
            true,
            "https",
        );
        let doc = ob3_achievement_from_achievement(&achievement(), &organization(), true, "https");
        assert_eq!(class.related[0].id, doc.id);
        assert_eq!(doc.related[0].id, class.id);
    }
}
