//! Game session issuance.
//!
//! ## Endpoints
//!
//! - POST /api/session - Issue a signed, single-use session token and the
//!   seed for the run

use axum::{
    Json, Router, debug_handler, extract::State, response::IntoResponse, routing::post,
};
use chrono::{TimeDelta, Utc};

use crate::{
    error::AppError, middleware::client::ClientFingerprint, services::session, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_session))
}

#[debug_handler]
async fn create_session(
    State(state): State<AppState>,
    fingerprint: ClientFingerprint,
) -> Result<impl IntoResponse, AppError> {
    let ttl = TimeDelta::milliseconds(state.config.session_ttl_ms);
    let session = session::issue(
        &state.tokens,
        &state.calendar,
        &fingerprint.0,
        Utc::now(),
        ttl,
    )?;

    tracing::debug!(expires_at = session.expires_at, "Issued game session");

    Ok(Json(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestStateBuilder;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use shared::api::SessionResponse;

    #[tokio::test]
    async fn issues_token_bound_to_fingerprint() {
        let state = TestStateBuilder::new().build();
        let tokens = state.tokens.clone();

        let response = create_session(State(state), ClientFingerprint("fp-1".into()))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let session: SessionResponse = serde_json::from_slice(&body).unwrap();

        let claims = tokens.verify(&session.token, Utc::now()).unwrap();
        assert_eq!(claims.fingerprint, "fp-1");
        assert_eq!(claims.seed, session.seed);
        assert_eq!(session.week_start.len(), "2026-10-12".len());
    }
}
