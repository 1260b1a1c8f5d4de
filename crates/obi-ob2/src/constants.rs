//! Context URLs and version descriptors for the hosted formats.

/// JSON-LD context for Open Badges 2.0 documents.
pub const OB2_CONTEXT_URL: &str = "https://w3id.org/openbadges/v2";

/// Vocabulary namespace for Open Badges 2.0 terms.
pub const OB2_NAMESPACE: &str = "https://w3id.org/openbadges#";

/// Vocabulary namespace for Open Badges 3.0 terms.
pub const OB3_NAMESPACE: &str = "https://purl.imsglobal.org/spec/vc/ob/vocab.html#";

/// Version descriptor for the Open Badges 2.0 data model, used in
/// `related` cross-links.
pub const OB_VERSION_V2P0: &str = "Open Badges v2p0";

/// Version descriptor for the Open Badges 3.0 data model, used in
/// `related` cross-links.
pub const OB_VERSION_V3P0: &str = "Open Badges v3p0";

/// Vocabulary IRI of the 3.0 `Achievement` term.
pub fn achievement_definition_url() -> String {
    format!("{OB3_NAMESPACE}Achievement")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn achievement_definition_is_in_ob3_namespace() {
        assert_eq!(
            achievement_definition_url(),
            "https://purl.imsglobal.org/spec/vc/ob/vocab.html#Achievement"
        );
    }
}
