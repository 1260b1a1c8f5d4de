//! # obi-api — Axum API service for the Open Badge Issuer stack
//!
//! Serves signed Open Badges credentials and the public hosted documents
//! that verifiers fetch.
//!
//! ## API Surface
//!
//! | Route                          | Module                   | Auth |
//! |--------------------------------|--------------------------|------|
//! | `POST /claims/:id/download`    | [`routes::claims`]       | yes  |
//! | `GET /ob2/a/:id`               | [`routes::ob2`]          | no   |
//! | `GET /ob2/b/:id`               | [`routes::ob2`]          | no   |
//! | `GET /ob2/i`                   | [`routes::ob2`]          | no   |
//! | `GET /a/:id`                   | [`routes::achievements`] | no   |
//! | `GET /.well-known/did.json`    | [`routes::did`]          | no   |
//! | `GET /u/:id/did.json`          | [`routes::did`]          | no   |
//! | `GET /credentials/:id`         | [`routes::credentials`]  | no   |
//!
//! Health probes (`/health/*`) are mounted alongside and always answer.
//!
//! ## Multi-tenancy
//!
//! All routes resolve their organization from the request `Host` header.
//! An organization only ever serves documents under its own domain, which
//! is also the `did:web` method-specific id those documents reference.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::claims::router())
        .merge(routes::ob2::router())
        .merge(routes::achievements::router())
        .merge(routes::did::router())
        .merge(routes::credentials::router())
        .route("/health/liveness", get(|| async { "ok" }))
        .route("/health/readiness", get(|| async { "ready" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
