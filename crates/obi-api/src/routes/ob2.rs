//! Public Open Badges 2.0 hosted documents.
//!
//! These URLs are the verification endpoints for hosted badges, so they
//! are served unauthenticated. Anything not shareable is a plain 404.

use axum::extract::{Host, Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use obi_core::{AchievementId, ClaimId};
use obi_ob2::{
    badge_assertion_from_claim, badge_class_from_achievement, issuer_from_organization,
    BadgeAssertion, BadgeClass, Ob2Issuer,
};

use crate::error::AppError;
use crate::routes::resolve_organization;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ob2/a/:claim_id", get(hosted_assertion))
        .route("/ob2/b/:achievement_id", get(hosted_badge_class))
        .route("/ob2/i", get(hosted_issuer))
}

/// GET /ob2/a/:claim_id — the hosted assertion for a shareable claim.
async fn hosted_assertion(
    State(state): State<AppState>,
    Host(host): Host,
    Path(claim_id): Path<String>,
) -> Result<Json<BadgeAssertion>, AppError> {
    let organization = resolve_organization(&state, &host).await?;

    let bundle = state
        .store
        .claim_bundle(&ClaimId::new(claim_id))
        .await?
        .filter(|bundle| bundle.claim.organization_id == organization.id)
        .ok_or_else(|| AppError::NotFound("assertion not found".to_string()))?;

    let assertion = badge_assertion_from_claim(
        &bundle.claim,
        &bundle.achievement,
        &bundle.organization,
        &bundle.user,
        &state.config.http_protocol,
        Utc::now(),
    )
    .ok_or_else(|| AppError::NotFound("assertion not found".to_string()))?;
    Ok(Json(assertion))
}

/// GET /ob2/b/:achievement_id — the hosted badge class.
async fn hosted_badge_class(
    State(state): State<AppState>,
    Host(host): Host,
    Path(achievement_id): Path<String>,
) -> Result<Json<BadgeClass>, AppError> {
    let organization = resolve_organization(&state, &host).await?;

    let achievement = state
        .store
        .achievement(&AchievementId::new(achievement_id))
        .await?
        .filter(|achievement| achievement.organization_id == organization.id)
        .ok_or_else(|| AppError::NotFound("badge class not found".to_string()))?;

    Ok(Json(badge_class_from_achievement(
        &achievement,
        &organization,
        true,
        &state.config.http_protocol,
    )))
}

/// GET /ob2/i — the hosted issuer profile for the organization.
async fn hosted_issuer(
    State(state): State<AppState>,
    Host(host): Host,
) -> Result<Json<Ob2Issuer>, AppError> {
    let organization = resolve_organization(&state, &host).await?;
    Ok(Json(issuer_from_organization(
        &organization,
        true,
        &state.config.http_protocol,
    )))
}
