//! Postgres store.
//!
//! Plain `sqlx::query_as` over hand-written row structs; no ORM layer.
//! The credential upsert is one statement with `RETURNING`, so the caller
//! always sees the row the database settled on, including the preserved
//! record id when a concurrent writer got there first.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use obi_core::{
    Achievement, AchievementClaim, AchievementId, ClaimId, ClaimStatus, Identifier,
    IdentifierType, Organization, OrganizationId, SigningKey, User, UserId,
};
use obi_vc::cache::{ClaimBundle, CredentialRecord, CredentialUpsert, StoreError};

/// Postgres-backed store: a connection pool plus the queries in this file.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

fn store_err(err: sqlx::Error) -> StoreError {
    StoreError(err.to_string())
}

#[derive(FromRow)]
struct OrganizationRow {
    id: String,
    domain: String,
    name: String,
    email: String,
    description: String,
    url: Option<String>,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Organization {
            id: OrganizationId::new(row.id),
            domain: row.domain,
            name: row.name,
            email: row.email,
            description: row.description,
            url: row.url,
        }
    }
}

#[derive(FromRow)]
struct AchievementRow {
    id: String,
    organization_id: String,
    name: String,
    description: String,
    criteria_id: Option<String>,
    criteria_narrative: Option<String>,
    image: Option<String>,
}

impl From<AchievementRow> for Achievement {
    fn from(row: AchievementRow) -> Self {
        Achievement {
            id: AchievementId::new(row.id),
            organization_id: OrganizationId::new(row.organization_id),
            name: row.name,
            description: row.description,
            criteria_id: row.criteria_id,
            criteria_narrative: row.criteria_narrative,
            image: row.image,
        }
    }
}

#[derive(FromRow)]
struct ClaimRow {
    id: String,
    achievement_id: String,
    user_id: String,
    organization_id: String,
    claim_status: String,
    valid_from: Option<DateTime<Utc>>,
    valid_until: Option<DateTime<Utc>>,
    json: Option<serde_json::Value>,
}

impl ClaimRow {
    fn into_claim(self) -> Result<AchievementClaim, StoreError> {
        let claim_status = ClaimStatus::from_str(&self.claim_status).map_err(StoreError)?;
        Ok(AchievementClaim {
            id: ClaimId::new(self.id),
            achievement_id: AchievementId::new(self.achievement_id),
            user_id: UserId::new(self.user_id),
            organization_id: OrganizationId::new(self.organization_id),
            claim_status,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            json: self.json,
        })
    }
}

#[derive(FromRow)]
struct IdentifierRow {
    #[sqlx(rename = "type")]
    identifier_type: String,
    identifier: String,
    verified: bool,
}

impl IdentifierRow {
    fn into_identifier(self) -> Result<Identifier, StoreError> {
        let identifier_type =
            IdentifierType::from_str(&self.identifier_type).map_err(StoreError)?;
        Ok(Identifier {
            identifier_type,
            identifier: self.identifier,
            verified: self.verified,
        })
    }
}

#[derive(FromRow)]
struct SigningKeyRow {
    id: String,
    organization_id: String,
    public_key_multibase: String,
    private_key_multibase: String,
    revoked: bool,
}

impl From<SigningKeyRow> for SigningKey {
    fn from(row: SigningKeyRow) -> Self {
        SigningKey {
            id: obi_core::KeyId::new(row.id),
            organization_id: OrganizationId::new(row.organization_id),
            public_key_multibase: row.public_key_multibase,
            private_key_multibase: row.private_key_multibase,
            revoked: row.revoked,
        }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    id: String,
    claim_id: String,
    organization_id: String,
    achievement_id: String,
    creator_user_id: String,
    identifier: String,
    subject_id: String,
    json: serde_json::Value,
}

impl From<CredentialRow> for CredentialRecord {
    fn from(row: CredentialRow) -> Self {
        CredentialRecord {
            id: row.id,
            claim_id: ClaimId::new(row.claim_id),
            organization_id: OrganizationId::new(row.organization_id),
            achievement_id: AchievementId::new(row.achievement_id),
            creator_user_id: UserId::new(row.creator_user_id),
            identifier: row.identifier,
            subject_id: row.subject_id,
            json: row.json,
        }
    }
}

impl PgStore {
    /// Connect the pool and run embedded migrations.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect(url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");

        Ok(Self { pool })
    }

    pub async fn organization_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<Organization>, StoreError> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            "SELECT id, domain, name, email, description, url
             FROM organizations WHERE domain = $1",
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(row.map(Organization::from))
    }

    pub async fn achievement(
        &self,
        achievement_id: &AchievementId,
    ) -> Result<Option<Achievement>, StoreError> {
        let row = sqlx::query_as::<_, AchievementRow>(
            "SELECT id, organization_id, name, description, criteria_id, criteria_narrative, image
             FROM achievements WHERE id = $1",
        )
        .bind(achievement_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(row.map(Achievement::from))
    }

    pub async fn signing_keys(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<SigningKey>, StoreError> {
        let rows = sqlx::query_as::<_, SigningKeyRow>(
            "SELECT id, organization_id, public_key_multibase, private_key_multibase, revoked
             FROM signing_keys WHERE organization_id = $1 ORDER BY id",
        )
        .bind(organization_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(rows.into_iter().map(SigningKey::from).collect())
    }

    async fn user(&self, user_id: &UserId) -> Result<User, StoreError> {
        let rows = sqlx::query_as::<_, IdentifierRow>(
            "SELECT type, identifier, verified
             FROM identifiers WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;
        let identifiers = rows
            .into_iter()
            .map(IdentifierRow::into_identifier)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(User {
            id: user_id.clone(),
            identifiers,
        })
    }

    pub async fn claim_bundle(
        &self,
        claim_id: &ClaimId,
    ) -> Result<Option<ClaimBundle>, StoreError> {
        let Some(row) = sqlx::query_as::<_, ClaimRow>(
            "SELECT id, achievement_id, user_id, organization_id, claim_status,
                    valid_from, valid_until, json
             FROM achievement_claims WHERE id = $1",
        )
        .bind(claim_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?
        else {
            return Ok(None);
        };
        let claim = row.into_claim()?;

        let Some(achievement) = self.achievement(&claim.achievement_id).await? else {
            return Ok(None);
        };
        let Some(organization) = sqlx::query_as::<_, OrganizationRow>(
            "SELECT id, domain, name, email, description, url
             FROM organizations WHERE id = $1",
        )
        .bind(claim.organization_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?
        .map(Organization::from) else {
            return Ok(None);
        };

        let user = self.user(&claim.user_id).await?;
        let signing_keys = self.signing_keys(&claim.organization_id).await?;

        let cached = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, claim_id, organization_id, achievement_id, creator_user_id,
                    identifier, subject_id, json
             FROM achievement_credentials WHERE claim_id = $1",
        )
        .bind(claim_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?
        .map(CredentialRecord::from);

        Ok(Some(ClaimBundle {
            claim,
            achievement,
            organization,
            user,
            signing_keys,
            cached,
        }))
    }

    pub async fn credential_record(
        &self,
        id: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, claim_id, organization_id, achievement_id, creator_user_id,
                    identifier, subject_id, json
             FROM achievement_credentials WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(row.map(CredentialRecord::from))
    }

    /// Single-statement upsert keyed on `claim_id`. The record id passed
    /// in the `VALUES` is only used when no row exists yet; a conflicting
    /// write keeps the existing id.
    pub async fn upsert_credential(
        &self,
        upsert: CredentialUpsert,
    ) -> Result<CredentialRecord, StoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "INSERT INTO achievement_credentials
                (id, claim_id, organization_id, achievement_id, creator_user_id,
                 identifier, subject_id, json, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now(), now())
             ON CONFLICT (claim_id) DO UPDATE SET
                identifier = EXCLUDED.identifier,
                subject_id = EXCLUDED.subject_id,
                json = EXCLUDED.json,
                updated_at = now()
             RETURNING id, claim_id, organization_id, achievement_id, creator_user_id,
                       identifier, subject_id, json",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(upsert.claim_id.as_str())
        .bind(upsert.organization_id.as_str())
        .bind(upsert.achievement_id.as_str())
        .bind(upsert.creator_user_id.as_str())
        .bind(&upsert.identifier)
        .bind(&upsert.subject_id)
        .bind(&upsert.json)
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(CredentialRecord::from(row))
    }
}
