//! Staff authentication for the admin endpoint.
//!
//! Usage: Add `AdminAccess` as an extractor parameter to require the
//! `X-Admin-Token` header to match the configured admin token.
//!
//! ```ignore
//! async fn my_handler(_admin: AdminAccess, ...) -> ... {
//!     // only reached with a valid token
//! }
//! ```

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use shared::api::ErrorBody;

use super::tokens_match;
use crate::state::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Marker for a request that presented the admin token.
#[derive(Debug)]
pub struct AdminAccess;

impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = AdminError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state
            .config
            .admin_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(AdminError::NotConfigured)?;

        let provided = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if !tokens_match(provided, expected) {
            tracing::warn!("Rejected admin request with invalid token");
            return Err(AdminError::InvalidToken);
        }

        Ok(AdminAccess)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AdminError {
    NotConfigured,
    InvalidToken,
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AdminError::NotConfigured => (StatusCode::FORBIDDEN, "Admin access is not configured"),
            AdminError::InvalidToken => (StatusCode::UNAUTHORIZED, "Unauthorized"),
        };

        let body = ErrorBody {
            error: message.to_string(),
            retry_after: None,
        };

        (status, Json(body)).into_response()
    }
}
