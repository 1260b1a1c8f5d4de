//! The hosted Open Badges 3.0 achievement document.
//!
//! This is the URL the 2.0 badge class and assertion `related` entries
//! point at, so it is served unauthenticated like the rest of the
//! hosted-document surface.

use axum::extract::{Host, Path, State};
use axum::routing::get;
use axum::{Json, Router};

use obi_core::AchievementId;
use obi_ob2::{ob3_achievement_from_achievement, Ob3Achievement};

use crate::error::AppError;
use crate::routes::resolve_organization;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/a/:achievement_id", get(hosted_achievement))
}

/// GET /a/:achievement_id — the organization's hosted achievement
/// document, with its `related` cross-link back to the badge class.
async fn hosted_achievement(
    State(state): State<AppState>,
    Host(host): Host,
    Path(achievement_id): Path<String>,
) -> Result<Json<Ob3Achievement>, AppError> {
    let organization = resolve_organization(&state, &host).await?;

    let achievement = state
        .store
        .achievement(&AchievementId::new(achievement_id))
        .await?
        .filter(|achievement| achievement.organization_id == organization.id)
        .ok_or_else(|| AppError::NotFound("achievement not found".to_string()))?;

    Ok(Json(ob3_achievement_from_achievement(
        &achievement,
        &organization,
        true,
        &state.config.http_protocol,
    )))
}
