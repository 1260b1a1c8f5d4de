//! # JSON-LD document loader
//!
//! Resolves `@context` URLs during canonicalization. The pinned contexts
//! come straight from the [`ContextStore`] with no I/O; anything else is
//! fetched over HTTPS, and a fetch failure aborts the signing attempt
//! that asked for it.

use serde_json::Value;

use crate::contexts::ContextStore;
use crate::error::IssueError;

/// A resolved context document.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    /// The URL the document was resolved for.
    pub document_url: String,
    /// The context document itself.
    pub document: Value,
    /// Whether it came from the pinned store (no network involved).
    pub pinned: bool,
}

/// Pinned-first context resolver with a strict network fallback.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    store: ContextStore,
    http: reqwest::Client,
}

impl DocumentLoader {
    /// Build a loader over an explicit context store.
    pub fn new(store: ContextStore) -> Self {
        Self {
            store,
            http: reqwest::Client::new(),
        }
    }

    /// Resolve a context URL.
    ///
    /// Pinned URLs resolve immediately and deterministically. Unrecognized
    /// URLs must be well-formed HTTPS and are fetched with the network
    /// timeouts of the underlying client; any failure surfaces as
    /// [`IssueError::ContextResolution`].
    pub async fn resolve(&self, url: &str) -> Result<LoadedDocument, IssueError> {
        if let Some(document) = self.store.get(url) {
            return Ok(LoadedDocument {
                document_url: url.to_string(),
                document: document.clone(),
                pinned: true,
            });
        }

        if !url.starts_with("https://") {
            return Err(IssueError::ContextResolution {
                url: url.to_string(),
                reason: "only https URLs are resolvable".to_string(),
            });
        }

        tracing::debug!(url, "context not pinned, fetching");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| IssueError::ContextResolution {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let document: Value =
            response
                .json()
                .await
                .map_err(|e| IssueError::ContextResolution {
                    url: url.to_string(),
                    reason: format!("invalid JSON: {e}"),
                })?;

        Ok(LoadedDocument {
            document_url: url.to_string(),
            document,
            pinned: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contexts::{CREDENTIALS_V1_URL, ED25519_2020_V1_URL, OPEN_BADGES_V3_URL};

    #[tokio::test]
    async fn pinned_urls_resolve_without_network() {
        let loader = DocumentLoader::new(ContextStore::bundled());
        for url in [CREDENTIALS_V1_URL, OPEN_BADGES_V3_URL, ED25519_2020_V1_URL] {
            let loaded = loader.resolve(url).await.unwrap();
            assert!(loaded.pinned);
            assert_eq!(loaded.document_url, url);
        }
    }

    #[tokio::test]
    async fn non_https_url_is_rejected() {
        let loader = DocumentLoader::new(ContextStore::bundled());
        let err = loader.resolve("ftp://example.com/ctx").await.unwrap_err();
        assert!(matches!(err, IssueError::ContextResolution { .. }));
    }

    #[tokio::test]
    async fn pinned_resolution_is_deterministic() {
        let loader = DocumentLoader::new(ContextStore::bundled());
        let a = loader.resolve(CREDENTIALS_V1_URL).await.unwrap();
        let b = loader.resolve(CREDENTIALS_V1_URL).await.unwrap();
        assert_eq!(a, b);
    }
}
