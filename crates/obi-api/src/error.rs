//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps issuing-pipeline errors from obi-vc to HTTP status codes and
//! JSON error bodies. Never exposes internal error details in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use obi_vc::cache::StoreError;
use obi_vc::IssueError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found, or not visible to the caller (404).
    ///
    /// Ownership failures are deliberately reported as 404 rather than
    /// 403 so that claim ids cannot be probed for existence.
    #[error("not found: {0}")]
    NotFound(String),

    /// The resource exists but must not be published (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Missing or invalid caller identity (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500). Message is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),

    /// A remote JSON-LD context could not be resolved (502).
    #[error("upstream context resolution failed: {0}")]
    Upstream(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal or upstream error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Upstream(_) => "An upstream service error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream(_) => tracing::error!(error = %self, "context resolution error"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<IssueError> for AppError {
    fn from(err: IssueError) -> Self {
        match &err {
            IssueError::MissingEmailIdentifier => Self::NotFound(err.to_string()),
            IssueError::NotShareable(_) => Self::Forbidden(err.to_string()),
            IssueError::ContextResolution { .. } => Self::Upstream(err.to_string()),
            IssueError::NoSigningKey(_)
            | IssueError::Key(_)
            | IssueError::Canonicalization(_)
            | IssueError::InvalidProof(_)
            | IssueError::Store(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_code() {
        let err = AppError::NotFound("missing claim".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn forbidden_status_code() {
        let err = AppError::Forbidden("claim not shareable".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code, "FORBIDDEN");
    }

    #[test]
    fn unauthorized_status_code() {
        let err = AppError::Unauthorized("no caller identity".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, "UNAUTHORIZED");
    }

    #[test]
    fn internal_message_is_not_exposed() {
        let response = AppError::Internal("private key material".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_email_maps_to_not_found() {
        let err: AppError = IssueError::MissingEmailIdentifier.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn unshareable_maps_to_forbidden() {
        let err: AppError = IssueError::NotShareable("c1".to_string()).into();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn context_resolution_maps_to_bad_gateway() {
        let err: AppError = IssueError::ContextResolution {
            url: "https://ctx.example.com".to_string(),
            reason: "timeout".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn missing_key_maps_to_internal() {
        let err: AppError = IssueError::NoSigningKey("o1".to_string()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
