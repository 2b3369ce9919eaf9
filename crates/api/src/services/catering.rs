//! Catering request intake.

use chrono::{DateTime, NaiveDate, Utc};
use shared::api::CateringPayload;
use uuid::Uuid;

use super::{leaderboard::make_room, sanitize, sha256_hex};
use crate::{config::Config, models::CateringRequest};

const NAME_MAX: usize = 60;
const CONTACT_MAX: usize = 60;

#[derive(Debug, Clone, Copy)]
pub struct CateringLimits {
    pub max_guests: i64,
    pub max_details: usize,
    pub max_entries: usize,
}

impl CateringLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_guests: config.catering_max_guests,
            max_details: config.catering_max_details,
            max_entries: config.catering_max_entries,
        }
    }
}

/// Sanitizes `payload` into a request, or returns the user-facing reason
/// it was rejected.
pub fn build_request(
    payload: &CateringPayload,
    limits: &CateringLimits,
    now: DateTime<Utc>,
) -> Result<CateringRequest, &'static str> {
    let name = sanitize::name(&payload.name, NAME_MAX);
    if name.is_empty() {
        return Err("Name is required.");
    }

    let contact = sanitize::contact(&payload.contact, CONTACT_MAX);
    if contact.is_empty() {
        return Err("Email or phone is required.");
    }

    let date = payload.date.trim();
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err("Invalid date.");
    }

    if payload.guests < 1 || payload.guests > limits.max_guests {
        return Err("Invalid number of guests.");
    }

    Ok(CateringRequest {
        id: Uuid::new_v4().to_string(),
        name,
        contact,
        date: date.to_string(),
        guests: payload.guests,
        details: sanitize::details(&payload.details, limits.max_details),
        created_at: now,
    })
}

pub fn fingerprint_key(fingerprint: &str) -> String {
    format!("catering:fp:{}", fingerprint)
}

pub fn contact_key(contact: &str) -> String {
    format!("catering:contact:{}", sha256_hex(&contact.to_lowercase()))
}

/// Appends `request`, keeping only the newest `max_entries` (0 keeps all).
///
/// Older requests are trimmed first so the accepted one always survives.
pub fn append(requests: &mut Vec<CateringRequest>, request: CateringRequest, max_entries: usize) {
    make_room(requests, max_entries, |r| r.created_at);
    requests.push(request);
}
