//! # obi-vc — Open Badges 3.0 Verifiable Credentials
//!
//! The credential construction and signing pipeline:
//!
//! - **DID builder** ([`did`]) — deterministic `did:web:` identifiers for
//!   organizations, signing keys, and credential subjects, plus the DID
//!   documents served at `/.well-known/did.json`.
//! - **Context store & document loader** ([`contexts`], [`loader`]) —
//!   pinned JSON-LD contexts served without network access; unrecognized
//!   URLs fall back to an HTTPS fetch that aborts signing on failure.
//! - **Credential document builder** ([`credential`]) — assembles the
//!   unsigned `OpenBadgeCredential` from claim, achievement, organization,
//!   and user records.
//! - **Signing suite** ([`suite`]) — Ed25519Signature2020 proofs over
//!   canonicalized credential bytes using the organization's key.
//! - **Cache freshness** ([`cache`]) — decides when a previously signed
//!   credential must be regenerated, and upserts the new one through the
//!   store's atomic by-claim operation.
//!
//! ## Security Invariants
//!
//! - All proof computation uses [`CanonicalBytes`](obi_core::CanonicalBytes)
//!   for payload canonicalization, never raw `serde_json::to_vec()`.
//! - Every `@context` URL must resolve through the [`loader::DocumentLoader`]
//!   before a proof is produced; resolution failure is fatal for the
//!   signing attempt.
//! - Private key material lives only inside a signing call.

pub mod cache;
pub mod contexts;
pub mod credential;
pub mod did;
pub mod error;
pub mod loader;
pub mod proof;
pub mod suite;

// Re-export primary types.
pub use cache::{
    get_or_refresh, is_cache_expired, ClaimBundle, CredentialRecord, CredentialStore,
    CredentialUpsert, StoreError, DEFAULT_CACHE_TIMEOUT_MS,
};
pub use contexts::{
    ContextStore, CREDENTIALS_V1_URL, DID_V1_URL, ED25519_2020_V1_URL, OPEN_BADGES_V3_URL,
};
pub use credential::{
    build_credential, AchievementBlock, AchievementCredential, Criteria, CredentialSubject,
    IdentityObject, IssuerProfile,
};
pub use did::{
    assemble_did, credential_subject_did, key_did, organization_did, organization_did_document,
    subject_did_document, user_id_from_subject_did, DidDocument, VerificationMethod,
};
pub use error::IssueError;
pub use loader::{DocumentLoader, LoadedDocument};
pub use proof::{Proof, PROOF_PURPOSE_ASSERTION, PROOF_TYPE_ED25519_2020};
pub use suite::{verify_credential, Ed25519Suite};
