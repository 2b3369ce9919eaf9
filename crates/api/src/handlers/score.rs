//! Score submission.
//!
//! A submission walks a fixed pipeline, and the first failing step decides
//! the response:
//!
//! 1. token verifies (401; missing token is 400)
//! 2. token fingerprint matches the caller (403)
//! 3. session was not redeemed before (409)
//! 4. name and contact are present, metrics are plausible for the claimed
//!    duration (400)
//! 5. rate limits pass, device first, then contact (429)
//! 6. entry written, session marked used, document saved
//!
//! Plausibility failures never touch the rate limit records.
//!
//! ## Endpoints
//!
//! - POST /api/score - Submit the final metrics of a game run

use axum::{
    Json, Router, debug_handler,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::{DateTime, Utc};
use garde::Validate;
use shared::api::{SubmitScorePayload, SubmitScoreResponse};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::{client::ClientFingerprint, json::JsonBody},
    models::LeaderboardEntry,
    services::{
        leaderboard,
        sanitize::{self, CONTACT_MAX, ContactKind, NAME_MAX},
        scores::{PlausibilityBounds, RunMetrics},
    },
    state::AppState,
    stores::RateLimitResult,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_score))
}

#[debug_handler]
async fn submit_score(
    State(state): State<AppState>,
    fingerprint: ClientFingerprint,
    JsonBody(payload): JsonBody<SubmitScorePayload>,
) -> Result<impl IntoResponse, AppError> {
    let response = submit(&state, &fingerprint.0, &payload, Utc::now()).await?;
    Ok(Json(response))
}

async fn submit(
    state: &AppState,
    fingerprint: &str,
    payload: &SubmitScorePayload,
    now: DateTime<Utc>,
) -> Result<SubmitScoreResponse, AppError> {
    payload
        .validate()
        .map_err(|_| AppError::Validation("Session token is required.".to_string()))?;

    let claims = state.tokens.verify(&payload.token, now).ok_or(AppError::External(
        StatusCode::UNAUTHORIZED,
        "Invalid or expired session.",
    ))?;

    if claims.fingerprint != fingerprint {
        tracing::warn!(session_id = %claims.session_id, "Session used from another device");
        return Err(AppError::External(
            StatusCode::FORBIDDEN,
            "Session does not match this device.",
        ));
    }

    let mut doc = state.stores.state.load().await?;
    doc.prune_used_sessions(now);

    if doc.is_session_used(&claims.session_id) {
        return Err(AppError::External(
            StatusCode::CONFLICT,
            "This session was already submitted.",
        ));
    }

    let name = sanitize::name(&payload.name, NAME_MAX);
    if name.is_empty() {
        return Err(AppError::Validation("Name is required.".to_string()));
    }
    let contact = sanitize::contact(payload.raw_contact(), CONTACT_MAX);
    if contact.is_empty() {
        return Err(AppError::Validation(
            "Instagram handle or phone is required.".to_string(),
        ));
    }

    let run = RunMetrics::from(payload);
    PlausibilityBounds::from_config(&state.config)
        .check(&run)
        .map_err(|reason| {
            tracing::info!(
                reason,
                score = run.score,
                duration_ms = run.duration_ms,
                "Rejected implausible run"
            );
            AppError::Validation(reason.to_string())
        })?;

    let device_key = format!("fp:{}", fingerprint);
    if let RateLimitResult::Exceeded(retry_after) =
        state.limiter.check_and_record(&mut doc.rate, &device_key, now)
    {
        return Err(AppError::RateLimited {
            message: "Too many attempts. Wait a moment.",
            retry_after,
        });
    }

    let kind = ContactKind::of(&contact);
    let contact_key = kind.rate_key(&contact);
    if let RateLimitResult::Exceeded(retry_after) =
        state.limiter.check_and_record(&mut doc.rate, &contact_key, now)
    {
        // The device attempt above was recorded and must stick.
        state.stores.state.save(&doc).await?;
        let message = match kind {
            ContactKind::Handle => "Too many attempts for this handle.",
            ContactKind::Phone => "Too many attempts for this phone.",
        };
        return Err(AppError::RateLimited {
            message,
            retry_after,
        });
    }

    let entry = LeaderboardEntry {
        id: Uuid::new_v4().to_string(),
        name,
        phone: (kind == ContactKind::Phone).then(|| contact.clone()),
        contact,
        score: run.score,
        distance: run.distance,
        collectibles: run.collectibles,
        max_combo: run.max_combo,
        duration_ms: run.duration_ms,
        created_at: now,
    };
    let entry_id = entry.id.clone();

    let rank = leaderboard::insert(&mut doc.entries, entry, state.config.max_entries)
        .ok_or_else(|| anyhow::anyhow!("entry {} missing after insert", entry_id))?;
    doc.mark_session_used(&claims.session_id, now);

    state.stores.state.save(&doc).await?;

    tracing::info!(entry_id = %entry_id, rank, score = run.score, "Score committed");

    Ok(SubmitScoreResponse {
        ok: true,
        entry_id,
        rank,
    })
}
