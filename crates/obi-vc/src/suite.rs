//! # Ed25519Signature2020 signing suite
//!
//! Wraps an organization's signing key for the duration of one signing
//! call. Signing resolves every `@context` URL through the document
//! loader, canonicalizes the proof-less document, signs the canonical
//! bytes, and attaches the proof. Canonicalization and signature failures
//! are fatal for the call and surface unchanged.

use chrono::Utc;

use obi_core::{Organization, SigningKey};
use obi_crypto::{verify_multibase, IssuerKeyPair};

use crate::credential::AchievementCredential;
use crate::did::key_did;
use crate::error::IssueError;
use crate::loader::DocumentLoader;
use crate::proof::{Proof, PROOF_TYPE_ED25519_2020};

/// A signing suite bound to one organization's key.
#[derive(Debug)]
pub struct Ed25519Suite {
    key_pair: IssuerKeyPair,
    verification_method: String,
}

impl Ed25519Suite {
    /// Bind a suite to an already-decoded key pair. Used by tooling that
    /// signs outside the per-organization key store.
    pub fn new(key_pair: IssuerKeyPair, verification_method: String) -> Self {
        Self {
            key_pair,
            verification_method,
        }
    }

    /// Resolve the organization's usable signing key.
    ///
    /// Selection policy is "first non-revoked"; no resolvable key is a
    /// configuration error, surfaced as [`IssueError::NoSigningKey`].
    pub fn for_organization(
        organization: &Organization,
        keys: &[SigningKey],
    ) -> Result<Self, IssueError> {
        let key = keys
            .iter()
            .find(|key| !key.revoked)
            .ok_or_else(|| IssueError::NoSigningKey(organization.id.to_string()))?;

        Ok(Self {
            key_pair: IssuerKeyPair::from_multibase(&key.private_key_multibase)?,
            verification_method: key_did(organization, key),
        })
    }

    /// The DID URL the proof will name as its verification method.
    pub fn verification_method(&self) -> &str {
        &self.verification_method
    }

    /// Sign a credential, returning a copy with the proof attached.
    ///
    /// Every `@context` entry must resolve through `loader` first; a
    /// resolution failure aborts the call before any signature is
    /// computed.
    pub async fn sign(
        &self,
        credential: &AchievementCredential,
        loader: &DocumentLoader,
    ) -> Result<AchievementCredential, IssueError> {
        for url in &credential.context {
            loader.resolve(url).await?;
        }

        let canonical = credential.signing_input()?;
        let proof_value = self.key_pair.sign_to_multibase(&canonical);

        let mut signed = credential.clone();
        signed.proof = Some(Proof::new(
            self.verification_method.clone(),
            proof_value,
            Utc::now(),
        ));

        tracing::debug!(
            credential = %signed.id,
            verification_method = %self.verification_method,
            "attached Ed25519Signature2020 proof"
        );
        Ok(signed)
    }
}

/// Verify a signed credential's proof against a `publicKeyMultibase`.
///
/// Recomputes the canonical signing input (proof removed) and checks the
/// Ed25519 signature. Pure; context resolution happened at signing time.
pub fn verify_credential(
    credential: &AchievementCredential,
    public_key_multibase: &str,
) -> Result<(), IssueError> {
    let proof = credential
        .proof
        .as_ref()
        .ok_or_else(|| IssueError::InvalidProof("credential has no proof".to_string()))?;

    if proof.proof_type != PROOF_TYPE_ED25519_2020 {
        return Err(IssueError::InvalidProof(format!(
            "unsupported proof type: {}",
            proof.proof_type
        )));
    }

    let canonical = credential.signing_input()?;
    verify_multibase(public_key_multibase, &canonical, &proof.proof_value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contexts::ContextStore;
    use crate::credential::build_credential;
    use crate::proof::PROOF_PURPOSE_ASSERTION;
    use obi_core::{KeyId, OrganizationId};

    fn signing_key(revoked: bool) -> SigningKey {
        let pair = IssuerKeyPair::generate();
        SigningKey {
            id: KeyId::from("k1"),
            organization_id: OrganizationId::from("o1"),
            public_key_multibase: pair.public_key_multibase(),
            private_key_multibase: pair.private_key_multibase(),
            revoked,
        }
    }

    fn unsigned() -> (AchievementCredential, Organization) {
        let (claim, achievement, organization, user) = crate::credential::tests::fixture();
        let credential = build_credential(&claim, &achievement, &organization, &user).unwrap();
        (credential, organization)
    }

    #[tokio::test]
    async fn signs_and_verifies() {
        let (credential, organization) = unsigned();
        let key = signing_key(false);
        let suite = Ed25519Suite::for_organization(&organization, &[key.clone()]).unwrap();
        let loader = DocumentLoader::new(ContextStore::bundled());

        let signed = suite.sign(&credential, &loader).await.unwrap();
        let proof = signed.proof.as_ref().unwrap();
        assert_eq!(proof.proof_type, "Ed25519Signature2020");
        assert_eq!(proof.proof_purpose, PROOF_PURPOSE_ASSERTION);
        assert_eq!(proof.verification_method, "did:web:example.com#key-0");
        assert!(proof.proof_value.starts_with('z'));

        verify_credential(&signed, &key.public_key_multibase).unwrap();
    }

    #[tokio::test]
    async fn tampered_credential_fails_verification() {
        let (credential, organization) = unsigned();
        let key = signing_key(false);
        let suite = Ed25519Suite::for_organization(&organization, &[key.clone()]).unwrap();
        let loader = DocumentLoader::new(ContextStore::bundled());

        let mut signed = suite.sign(&credential, &loader).await.unwrap();
        signed.credential_subject.achievement.name = "Forged".to_string();
        assert!(verify_credential(&signed, &key.public_key_multibase).is_err());
    }

    #[tokio::test]
    async fn revoked_only_keys_are_a_configuration_error() {
        let (_, organization) = unsigned();
        let err =
            Ed25519Suite::for_organization(&organization, &[signing_key(true)]).unwrap_err();
        assert!(matches!(err, IssueError::NoSigningKey(_)));
    }

    #[tokio::test]
    async fn no_keys_at_all_is_a_configuration_error() {
        let (_, organization) = unsigned();
        let err = Ed25519Suite::for_organization(&organization, &[]).unwrap_err();
        assert!(matches!(err, IssueError::NoSigningKey(_)));
    }

    #[tokio::test]
    async fn first_non_revoked_key_is_selected() {
        let (credential, organization) = unsigned();
        let revoked = signing_key(true);
        let usable = signing_key(false);
        let suite =
            Ed25519Suite::for_organization(&organization, &[revoked, usable.clone()]).unwrap();
        let loader = DocumentLoader::new(ContextStore::bundled());

        let signed = suite.sign(&credential, &loader).await.unwrap();
        verify_credential(&signed, &usable.public_key_multibase).unwrap();
    }

    #[tokio::test]
    async fn two_signings_agree_except_proof_metadata() {
        let (credential, organization) = unsigned();
        let key = signing_key(false);
        let suite = Ed25519Suite::for_organization(&organization, &[key]).unwrap();
        let loader = DocumentLoader::new(ContextStore::bundled());

        let first = suite.sign(&credential, &loader).await.unwrap();
        let second = suite.sign(&credential, &loader).await.unwrap();

        // Same document; for a fixed input only the proof may differ
        // (its `created` timestamp moves between calls).
        let mut a = first.clone();
        let mut b = second.clone();
        a.proof = None;
        b.proof = None;
        assert_eq!(a, b);
    }

    #[test]
    fn unsigned_credential_does_not_verify() {
        let (credential, _) = unsigned();
        let key = signing_key(false);
        assert!(verify_credential(&credential, &key.public_key_multibase).is_err());
    }
}
