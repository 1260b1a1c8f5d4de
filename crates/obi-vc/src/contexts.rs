//! # Pinned JSON-LD contexts
//!
//! The three contexts every signed credential references, bundled at
//! compile time so signing never depends on a third-party host being up.
//! The store is constructed explicitly and passed into the document
//! loader — there is no process-wide mutable state.
//!
//! The bundled files are pinned snapshots of the published context
//! documents; updating them is a deliberate, reviewed change.

use std::collections::HashMap;

use serde_json::Value;

/// W3C Verifiable Credentials core context.
pub const CREDENTIALS_V1_URL: &str = "https://www.w3.org/2018/credentials/v1";

/// Open Badges 3.0 context.
pub const OPEN_BADGES_V3_URL: &str = "https://purl.imsglobal.org/spec/ob/v3p0/context.json";

/// Ed25519Signature2020 suite context.
pub const ED25519_2020_V1_URL: &str = "https://w3id.org/security/suites/ed25519-2020/v1";

/// DID core context (used by DID documents, not by credentials).
pub const DID_V1_URL: &str = "https://www.w3.org/ns/did/v1";

const CREDENTIALS_V1_JSON: &str = include_str!("../contexts/credentials-v1.json");
const OPEN_BADGES_V3_JSON: &str = include_str!("../contexts/ob-v3p0.json");
const ED25519_2020_V1_JSON: &str = include_str!("../contexts/ed25519-2020-v1.json");

/// An immutable URL → context document mapping.
#[derive(Debug, Clone)]
pub struct ContextStore {
    contexts: HashMap<String, Value>,
}

impl ContextStore {
    /// Build the store from the bundled context snapshots.
    pub fn bundled() -> Self {
        let mut contexts = HashMap::new();
        for (url, raw) in [
            (CREDENTIALS_V1_URL, CREDENTIALS_V1_JSON),
            (OPEN_BADGES_V3_URL, OPEN_BADGES_V3_JSON),
            (ED25519_2020_V1_URL, ED25519_2020_V1_JSON),
        ] {
            let document = serde_json::from_str(raw)
                .expect("bundled context snapshots are valid JSON");
            contexts.insert(url.to_string(), document);
        }
        Self { contexts }
    }

    /// Look up a pinned context by URL.
    pub fn get(&self, url: &str) -> Option<&Value> {
        self.contexts.get(url)
    }

    /// Whether the URL has a pinned context.
    pub fn contains(&self, url: &str) -> bool {
        self.contexts.contains_key(url)
    }

    /// The pinned URLs, for diagnostics.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }
}
