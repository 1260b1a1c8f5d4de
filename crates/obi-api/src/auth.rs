//! Caller identity extraction.
//!
//! The service sits behind a session-terminating proxy that forwards the
//! authenticated user id in the `x-user-id` header. This extractor only
//! reads that header; session handling itself is out of scope here.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use obi_core::UserId;

use crate::error::AppError;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub user_id: UserId,
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Unauthorized("missing caller identity".to_string()))?;
        Ok(CallerIdentity {
            user_id: UserId::new(user_id),
        })
    }
}
