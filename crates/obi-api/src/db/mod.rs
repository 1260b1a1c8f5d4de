//! # Persistence layer
//!
//! Postgres persistence via SQLx when `DATABASE_URL` is set, an in-memory
//! store otherwise (development and tests). Both back the same [`Store`]
//! enum so handlers and the credential cache are storage-agnostic.
//!
//! ## Concurrency
//!
//! The credential cache write is a single-statement
//! `INSERT ... ON CONFLICT (claim_id) DO UPDATE`; the unique constraint on
//! `claim_id` is the only serialization point for concurrent regenerations
//! of the same claim. There are no in-process locks around it, and there
//! must not be: multiple service instances can share one database.

pub mod memory;
pub mod pg;

use obi_core::{Achievement, AchievementId, ClaimId, Organization, OrganizationId, SigningKey};
use obi_vc::cache::{ClaimBundle, CredentialRecord, CredentialStore, CredentialUpsert, StoreError};

pub use memory::MemoryStore;
pub use pg::PgStore;

use crate::config::AppConfig;

/// Storage backend for the API service.
#[derive(Clone)]
pub enum Store {
    /// Postgres-backed store.
    Pg(PgStore),
    /// In-memory store; state does not survive restarts.
    Memory(MemoryStore),
}

/// Initialize the storage backend from configuration.
///
/// Connects and runs embedded migrations when a database URL is present;
/// otherwise falls back to the in-memory store.
pub async fn init_store(config: &AppConfig) -> anyhow::Result<Store> {
    match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url).await?;
            tracing::info!("connected to PostgreSQL");
            Ok(Store::Pg(store))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set — running in-memory only mode. \
                 State will not survive restarts."
            );
            Ok(Store::Memory(MemoryStore::new()))
        }
    }
}

impl Store {
    /// Look up the organization serving a request host.
    pub async fn organization_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<Organization>, StoreError> {
        match self {
            Self::Pg(store) => store.organization_by_domain(domain).await,
            Self::Memory(store) => store.organization_by_domain(domain),
        }
    }

    /// Load a claim with everything the credential pipeline needs:
    /// achievement, organization, user with identifiers, signing keys,
    /// and the cached credential if one exists.
    pub async fn claim_bundle(&self, claim_id: &ClaimId) -> Result<Option<ClaimBundle>, StoreError> {
        match self {
            Self::Pg(store) => store.claim_bundle(claim_id).await,
            Self::Memory(store) => store.claim_bundle(claim_id),
        }
    }

    /// Load a single achievement.
    pub async fn achievement(
        &self,
        achievement_id: &AchievementId,
    ) -> Result<Option<Achievement>, StoreError> {
        match self {
            Self::Pg(store) => store.achievement(achievement_id).await,
            Self::Memory(store) => store.achievement(achievement_id),
        }
    }

    /// All signing keys of an organization, revoked ones included (the
    /// DID document lists them with their revocation state).
    pub async fn signing_keys(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<SigningKey>, StoreError> {
        match self {
            Self::Pg(store) => store.signing_keys(organization_id).await,
            Self::Memory(store) => store.signing_keys(organization_id),
        }
    }

    /// Look up a cached credential record by its store id.
    pub async fn credential_record(
        &self,
        id: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        match self {
            Self::Pg(store) => store.credential_record(id).await,
            Self::Memory(store) => store.credential_record(id),
        }
    }
}

impl CredentialStore for Store {
    async fn upsert_credential(
        &self,
        upsert: CredentialUpsert,
    ) -> Result<CredentialRecord, StoreError> {
        match self {
            Self::Pg(store) => store.upsert_credential(upsert).await,
            Self::Memory(store) => store.upsert_credential(upsert),
        }
    }
}
