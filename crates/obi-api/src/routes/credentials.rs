//! Cached credential record lookup.

use axum::extract::{Host, Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::error::AppError;
use crate::routes::resolve_organization;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/credentials/:credential_id", get(credential_record))
}

/// GET /credentials/:credential_id — the stored credential JSON, scoped
/// to the organization serving the request.
async fn credential_record(
    State(state): State<AppState>,
    Host(host): Host,
    Path(credential_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let organization = resolve_organization(&state, &host).await?;

    let record = state
        .store
        .credential_record(&credential_id)
        .await?
        .filter(|record| record.organization_id == organization.id)
        .ok_or_else(|| AppError::NotFound("credential not found".to_string()))?;
    Ok(Json(record.json))
}
