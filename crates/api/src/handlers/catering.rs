//! Catering request intake.
//!
//! Requests are appended to the state document, newest
//! `CATERING_MAX_ENTRIES` kept. Rate limited per device and per contact with
//! the same rules as score submissions.
//!
//! ## Endpoints
//!
//! - POST /api/catering - Submit a catering request

use axum::{
    Json, Router, debug_handler, extract::State, response::IntoResponse, routing::post,
};
use chrono::Utc;
use shared::api::{CateringPayload, CateringResponse};

use crate::{
    error::AppError,
    middleware::{client::ClientFingerprint, json::JsonBody},
    services::catering::{self, CateringLimits},
    state::AppState,
    stores::RateLimitResult,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_request))
}

#[debug_handler]
async fn create_request(
    State(state): State<AppState>,
    fingerprint: ClientFingerprint,
    JsonBody(payload): JsonBody<CateringPayload>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let limits = CateringLimits::from_config(&state.config);
    let request = catering::build_request(&payload, &limits, now)
        .map_err(|reason| AppError::Validation(reason.to_string()))?;

    let mut doc = state.stores.state.load().await?;

    let device_key = catering::fingerprint_key(&fingerprint.0);
    if let RateLimitResult::Exceeded(retry_after) =
        state.limiter.check_and_record(&mut doc.rate, &device_key, now)
    {
        return Err(AppError::RateLimited {
            message: "Too many attempts. Wait a moment.",
            retry_after,
        });
    }

    let contact_key = catering::contact_key(&request.contact);
    if let RateLimitResult::Exceeded(retry_after) =
        state.limiter.check_and_record(&mut doc.rate, &contact_key, now)
    {
        state.stores.state.save(&doc).await?;
        return Err(AppError::RateLimited {
            message: "Too many attempts for this contact.",
            retry_after,
        });
    }

    let response = CateringResponse {
        ok: true,
        request_id: request.id.clone(),
        created_at: request.created_at.timestamp_millis(),
    };

    tracing::info!(
        request_id = %request.id,
        guests = request.guests,
        date = %request.date,
        "Catering request received"
    );

    catering::append(&mut doc.catering_requests, request, limits.max_entries);
    state.stores.state.save(&doc).await?;

    Ok(Json(response))
}
