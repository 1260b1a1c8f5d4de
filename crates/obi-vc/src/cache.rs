//! # Credential cache and freshness policy
//!
//! A signed credential is cached per claim and reused until it goes
//! stale; staleness is measured against the `proof.created` timestamp
//! inside the cached JSON. Regeneration writes through the store's atomic
//! upsert-by-claim-id — the store's unique constraint, not an in-process
//! lock, is what keeps two near-simultaneous regenerations from creating
//! duplicate records. Multiple service instances may run behind a load
//! balancer; the atomicity must live in the store.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use obi_core::{
    Achievement, AchievementClaim, AchievementId, ClaimId, Organization, OrganizationId,
    SigningKey, User, UserId,
};

use crate::credential::build_credential;
use crate::error::IssueError;
use crate::loader::DocumentLoader;
use crate::suite::Ed25519Suite;

/// Default cache lifetime: ten minutes, in milliseconds. A cache-policy
/// choice, not a protocol requirement — override via configuration.
pub const DEFAULT_CACHE_TIMEOUT_MS: i64 = 600_000;

/// A cached signed-credential row.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRecord {
    /// Store-allocated record id (stable across refreshes).
    pub id: String,
    /// The owning claim; unique per record.
    pub claim_id: ClaimId,
    /// The signing organization.
    pub organization_id: OrganizationId,
    /// The awarded achievement.
    pub achievement_id: AchievementId,
    /// The user the credential was generated for.
    pub creator_user_id: UserId,
    /// The credential's own `id` (`urn:uuid:…`), for indexing.
    pub identifier: String,
    /// The credential's `credentialSubject.id`, for indexing.
    pub subject_id: String,
    /// The signed credential JSON.
    pub json: Value,
}

/// The fields written on a cache refresh.
#[derive(Debug, Clone)]
pub struct CredentialUpsert {
    /// The owning claim.
    pub claim_id: ClaimId,
    /// The signing organization.
    pub organization_id: OrganizationId,
    /// The awarded achievement.
    pub achievement_id: AchievementId,
    /// The requesting user.
    pub creator_user_id: UserId,
    /// The credential's own `id`.
    pub identifier: String,
    /// The credential's `credentialSubject.id`.
    pub subject_id: String,
    /// The signed credential JSON.
    pub json: Value,
}

/// A failure from the credential cache store.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Write side of the credential cache.
///
/// `upsert_credential` must be atomic on the claim id: if a record for
/// the claim exists its fields are overwritten in place (record id
/// preserved), otherwise one is created. Check-then-write sequences are
/// not acceptable implementations.
pub trait CredentialStore: Send + Sync {
    /// Atomically create-or-update the cache record for a claim.
    fn upsert_credential(
        &self,
        upsert: CredentialUpsert,
    ) -> impl std::future::Future<Output = Result<CredentialRecord, StoreError>> + Send;
}

/// Whether a cached credential JSON is past its lifetime at `now`.
///
/// A credential with no parseable `proof.created` is always stale. The
/// boundary is exclusive: a credential aged exactly `timeout_ms` is still
/// fresh.
pub fn is_cache_expired(credential_json: &Value, timeout_ms: i64, now: DateTime<Utc>) -> bool {
    let created = credential_json
        .get("proof")
        .and_then(|proof| proof.get("created"))
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc));

    match created {
        Some(created) => (now - created).num_milliseconds() > timeout_ms,
        None => true,
    }
}

/// Everything the cache path needs to serve one claim.
#[derive(Debug, Clone)]
pub struct ClaimBundle {
    /// The claim being downloaded.
    pub claim: AchievementClaim,
    /// Its achievement.
    pub achievement: Achievement,
    /// The owning organization.
    pub organization: Organization,
    /// The claiming user with identifiers.
    pub user: User,
    /// The organization's signing keys.
    pub signing_keys: Vec<SigningKey>,
    /// The cached credential, if one exists.
    pub cached: Option<CredentialRecord>,
}

/// Return the claim's signed credential, regenerating it when stale.
///
/// Fresh cache hits return the stored JSON unchanged — no re-signing, no
/// write. Stale (or absent) entries trigger build → sign → upsert; only
/// a successfully written record is authoritative, so the refreshed JSON
/// is returned from the store's row rather than from the in-memory
/// signing result.
pub async fn get_or_refresh<S: CredentialStore>(
    bundle: &ClaimBundle,
    store: &S,
    loader: &DocumentLoader,
    cache_timeout_ms: i64,
) -> Result<Value, IssueError> {
    if bundle.claim.valid_from.is_none() {
        return Err(IssueError::NotShareable(bundle.claim.id.to_string()));
    }

    if let Some(cached) = &bundle.cached {
        if !is_cache_expired(&cached.json, cache_timeout_ms, Utc::now()) {
            tracing::debug!(claim = %bundle.claim.id, "serving cached credential");
            return Ok(cached.json.clone());
        }
    }

    let unsigned = build_credential(
        &bundle.claim,
        &bundle.achievement,
        &bundle.organization,
        &bundle.user,
    )?;
    let suite = Ed25519Suite::for_organization(&bundle.organization, &bundle.signing_keys)?;
    let signed = suite.sign(&unsigned, loader).await?;

    let json = serde_json::to_value(&signed)
        .map_err(obi_core::CanonicalizationError::from)?;
    let record = store
        .upsert_credential(CredentialUpsert {
            claim_id: bundle.claim.id.clone(),
            organization_id: bundle.organization.id.clone(),
            achievement_id: bundle.achievement.id.clone(),
            creator_user_id: bundle.user.id.clone(),
            identifier: signed.id.clone(),
            subject_id: signed.credential_subject.id.clone(),
            json,
        })
        .await?;

    tracing::info!(claim = %bundle.claim.id, credential = %signed.id, "credential regenerated");
    Ok(record.json)
}
