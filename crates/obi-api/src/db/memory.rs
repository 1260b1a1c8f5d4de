//! In-memory store for development and tests.
//!
//! Mirrors the Postgres schema's behavior, including the upsert keeping
//! the existing record id on conflict. Locks are released before any
//! await point; nothing here holds a guard across I/O.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use obi_core::{
    Achievement, AchievementClaim, AchievementId, ClaimId, Organization, OrganizationId,
    SigningKey, User, UserId,
};
use obi_vc::cache::{ClaimBundle, CredentialRecord, CredentialUpsert, StoreError};

#[derive(Default)]
struct Inner {
    organizations: Vec<Organization>,
    users: HashMap<UserId, User>,
    achievements: HashMap<AchievementId, Achievement>,
    claims: HashMap<ClaimId, AchievementClaim>,
    signing_keys: Vec<SigningKey>,
    credentials: HashMap<ClaimId, CredentialRecord>,
}

/// Shared-state in-memory store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Seeding helpers, used at startup in in-memory mode and by tests.

    pub fn insert_organization(&self, organization: Organization) {
        self.inner.write().organizations.push(organization);
    }

    pub fn insert_user(&self, user: User) {
        self.inner.write().users.insert(user.id.clone(), user);
    }

    pub fn insert_achievement(&self, achievement: Achievement) {
        self.inner
            .write()
            .achievements
            .insert(achievement.id.clone(), achievement);
    }

    pub fn insert_claim(&self, claim: AchievementClaim) {
        self.inner.write().claims.insert(claim.id.clone(), claim);
    }

    pub fn insert_signing_key(&self, key: SigningKey) {
        self.inner.write().signing_keys.push(key);
    }

    pub fn organization_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<Organization>, StoreError> {
        Ok(self
            .inner
            .read()
            .organizations
            .iter()
            .find(|org| org.domain == domain)
            .cloned())
    }

    pub fn achievement(
        &self,
        achievement_id: &AchievementId,
    ) -> Result<Option<Achievement>, StoreError> {
        Ok(self.inner.read().achievements.get(achievement_id).cloned())
    }

    pub fn signing_keys(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<SigningKey>, StoreError> {
        Ok(self
            .inner
            .read()
            .signing_keys
            .iter()
            .filter(|key| &key.organization_id == organization_id)
            .cloned()
            .collect())
    }

    pub fn claim_bundle(&self, claim_id: &ClaimId) -> Result<Option<ClaimBundle>, StoreError> {
        let inner = self.inner.read();
        let Some(claim) = inner.claims.get(claim_id).cloned() else {
            return Ok(None);
        };
        let Some(achievement) = inner.achievements.get(&claim.achievement_id).cloned() else {
            return Ok(None);
        };
        let Some(organization) = inner
            .organizations
            .iter()
            .find(|org| org.id == claim.organization_id)
            .cloned()
        else {
            return Ok(None);
        };
        let user = inner
            .users
            .get(&claim.user_id)
            .cloned()
            .unwrap_or_else(|| User {
                id: claim.user_id.clone(),
                identifiers: Vec::new(),
            });
        let signing_keys = inner
            .signing_keys
            .iter()
            .filter(|key| key.organization_id == claim.organization_id)
            .cloned()
            .collect();
        let cached = inner.credentials.get(claim_id).cloned();

        Ok(Some(ClaimBundle {
            claim,
            achievement,
            organization,
            user,
            signing_keys,
            cached,
        }))
    }

    pub fn credential_record(&self, id: &str) -> Result<Option<CredentialRecord>, StoreError> {
        Ok(self
            .inner
            .read()
            .credentials
            .values()
            .find(|record| record.id == id)
            .cloned())
    }

    pub fn upsert_credential(
        &self,
        upsert: CredentialUpsert,
    ) -> Result<CredentialRecord, StoreError> {
        let mut inner = self.inner.write();
        let id = inner
            .credentials
            .get(&upsert.claim_id)
            .map(|existing| existing.id.clone())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let record = CredentialRecord {
            id,
            claim_id: upsert.claim_id.clone(),
            organization_id: upsert.organization_id,
            achievement_id: upsert.achievement_id,
            creator_user_id: upsert.creator_user_id,
            identifier: upsert.identifier,
            subject_id: upsert.subject_id,
            json: upsert.json,
        };
        inner.credentials.insert(upsert.claim_id, record.clone());
        Ok(record)
    }
}
