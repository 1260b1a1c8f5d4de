//! # API route modules
//!
//! - `claims` — authenticated signed-credential download for a claim.
//! - `ob2` — public Open Badges 2.0 hosted documents (assertion, badge
//!   class, issuer profile).
//! - `achievements` — the hosted 3.0 achievement document the 2.0
//!   documents cross-link to.
//! - `did` — the organization DID document at `/.well-known/did.json`
//!   and the per-subject stubs under `/u/`.
//! - `credentials` — cached credential record lookup.
//!
//! Every route is served per organization; the organization is resolved
//! from the request `Host`, matching how the hosted-document URLs inside
//! the documents themselves are assembled.

pub mod achievements;
pub mod claims;
pub mod credentials;
pub mod did;
pub mod ob2;

use obi_core::Organization;

use crate::error::AppError;
use crate::state::AppState;

/// Resolve the organization serving `host`.
///
/// Falls back to a lookup without the port so that a stored domain of
/// `badges.example.com` also answers `badges.example.com:8080` in local
/// setups.
pub(crate) async fn resolve_organization(
    state: &AppState,
    host: &str,
) -> Result<Organization, AppError> {
    if let Some(org) = state.store.organization_by_domain(host).await? {
        return Ok(org);
    }
    if let Some((bare, _port)) = host.rsplit_once(':') {
        if let Some(org) = state.store.organization_by_domain(bare).await? {
            return Ok(org);
        }
    }
    Err(AppError::NotFound(format!(
        "no organization serves {host}"
    )))
}
