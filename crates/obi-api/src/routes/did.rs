//! DID documents: the organization's own and the per-subject stubs.
//!
//! A `did:web:<domain>:u:<segment>` DID resolves to
//! `https://<domain>/u/<segment>/did.json`, so every subject DID minted
//! into a credential must answer there.

use axum::extract::{Host, Path, State};
use axum::routing::get;
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use obi_core::UserId;
use obi_vc::{organization_did_document, subject_did_document, DidDocument};

use crate::error::AppError;
use crate::routes::resolve_organization;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/.well-known/did.json", get(did_document))
        .route("/u/:encoded_user_id/did.json", get(subject_document))
}

/// GET /.well-known/did.json — the `did:web` document for the
/// organization, listing all its keys with their revocation state.
/// Private key fields never appear here.
async fn did_document(
    State(state): State<AppState>,
    Host(host): Host,
) -> Result<Json<DidDocument>, AppError> {
    let organization = resolve_organization(&state, &host).await?;
    let keys = state.store.signing_keys(&organization.id).await?;
    Ok(Json(organization_did_document(&organization, &keys)))
}

/// GET /u/:encoded_user_id/did.json — the stub document for a claim
/// subject. The path segment is the base64url user id exactly as minted
/// into `credentialSubject.id`; anything that does not decode is a
/// plain 404.
async fn subject_document(
    State(state): State<AppState>,
    Host(host): Host,
    Path(encoded_user_id): Path<String>,
) -> Result<Json<DidDocument>, AppError> {
    let organization = resolve_organization(&state, &host).await?;

    let bytes = URL_SAFE_NO_PAD
        .decode(encoded_user_id.as_bytes())
        .map_err(|_| AppError::NotFound("subject not found".to_string()))?;
    let user_id = String::from_utf8(bytes)
        .map_err(|_| AppError::NotFound("subject not found".to_string()))?;

    Ok(Json(subject_did_document(
        &organization,
        &UserId::new(user_id),
    )))
}
