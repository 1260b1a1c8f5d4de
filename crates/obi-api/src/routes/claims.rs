//! Signed-credential download for a claim.

use axum::extract::{Host, Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use obi_core::ClaimId;
use obi_vc::get_or_refresh;

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::routes::resolve_organization;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/claims/:claim_id/download", post(download_credential))
}

/// POST /claims/:claim_id/download — return the signed credential for the
/// caller's own claim, regenerating it when the cached one is stale.
///
/// A claim that exists but belongs to another user or organization is
/// reported as 404, the same as one that does not exist.
async fn download_credential(
    State(state): State<AppState>,
    Host(host): Host,
    caller: CallerIdentity,
    Path(claim_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let organization = resolve_organization(&state, &host).await?;

    let bundle = state
        .store
        .claim_bundle(&ClaimId::new(claim_id))
        .await?
        .ok_or_else(|| AppError::NotFound("claim not found".to_string()))?;

    if bundle.claim.organization_id != organization.id
        || bundle.claim.user_id != caller.user_id
    {
        return Err(AppError::NotFound("claim not found".to_string()));
    }

    let json = get_or_refresh(
        &bundle,
        &state.store,
        &state.loader,
        state.config.cache_timeout_ms,
    )
    .await?;
    Ok(Json(json))
}
