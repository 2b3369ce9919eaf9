//! Session issuance for a new game run.

use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use shared::api::{Period, SessionResponse};
use uuid::Uuid;

use crate::{models::SessionClaims, period::Calendar, token::TokenCodec};

/// Fresh claims bound to `fingerprint`, valid for `ttl` from `now`.
pub fn new_claims(fingerprint: &str, now: DateTime<Utc>, ttl: TimeDelta) -> SessionClaims {
    SessionClaims {
        session_id: Uuid::new_v4().to_string(),
        issued_at: now.timestamp_millis(),
        expires_at: (now + ttl).timestamp_millis(),
        fingerprint: fingerprint.to_string(),
        seed: rand::rng().random(),
    }
}

pub fn issue(
    tokens: &TokenCodec,
    calendar: &Calendar,
    fingerprint: &str,
    now: DateTime<Utc>,
    ttl: TimeDelta,
) -> Result<SessionResponse> {
    let claims = new_claims(fingerprint, now, ttl);
    let token = tokens.sign(&claims)?;

    Ok(SessionResponse {
        token,
        seed: claims.seed,
        expires_at: claims.expires_at,
        week_start: calendar.period_meta(Period::Weekly, now).label,
    })
}
