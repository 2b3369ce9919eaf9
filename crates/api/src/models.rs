use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::api::{AdminEntry, LeaderboardRow, VisitStatsView};

/// The single persisted JSON document.
///
/// Every request loads the whole document, mutates it and writes it back.
/// Missing fields load as empty so older documents keep working.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateDocument {
    pub entries: Vec<LeaderboardEntry>,
    /// Rate limit records keyed by `purpose:hash`.
    pub rate: HashMap<String, RateRecord>,
    /// Redeemed session ids → redemption time (ms).
    pub used_sessions: HashMap<String, i64>,
    pub visit_stats: VisitStats,
    pub catering_requests: Vec<CateringRequest>,
}

const USED_SESSION_TTL_MS: i64 = 24 * 60 * 60 * 1000;

impl StateDocument {
    /// Forgets redeemed sessions older than a day. Tokens live far shorter.
    pub fn prune_used_sessions(&mut self, now: DateTime<Utc>) {
        let cutoff = now.timestamp_millis() - USED_SESSION_TTL_MS;
        self.used_sessions.retain(|_, used_at| *used_at >= cutoff);
    }

    pub fn is_session_used(&self, session_id: &str) -> bool {
        self.used_sessions.contains_key(session_id)
    }

    pub fn mark_session_used(&mut self, session_id: &str, now: DateTime<Utc>) {
        self.used_sessions
            .insert(session_id.to_string(), now.timestamp_millis());
    }
}

/// One committed game run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub contact: String,
    /// Same as `contact` when the contact is a phone number.
    #[serde(default)]
    pub phone: Option<String>,
    pub score: i64,
    pub distance: i64,
    pub collectibles: i64,
    pub max_combo: i64,
    pub duration_ms: i64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn row(&self) -> LeaderboardRow {
        LeaderboardRow {
            name: self.name.clone(),
            score: self.score,
        }
    }

    pub fn admin_view(&self) -> AdminEntry {
        AdminEntry {
            id: self.id.clone(),
            name: self.name.clone(),
            contact: self.contact.clone(),
            phone: self.phone.clone(),
            score: self.score,
            distance: self.distance,
            collectibles: self.collectibles,
            max_combo: self.max_combo,
            duration_ms: self.duration_ms,
            created_at: self.created_at.timestamp_millis(),
        }
    }
}

/// Leaderboard order: higher score first, earlier submission wins ties.
pub fn leaderboard_order(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Per-key cooldown and sliding-window counters. Times are ms since epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRecord {
    pub last: i64,
    pub window_start: i64,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisitStats {
    pub total: u64,
    /// `YYYY-MM-DD` in the café's timezone → visits counted that day.
    pub by_day: BTreeMap<String, u64>,
    /// Fingerprint → last counted visit (ms).
    pub last_by_fp: HashMap<String, i64>,
}

impl VisitStats {
    /// Public view without per-fingerprint data.
    pub fn view(&self) -> VisitStatsView {
        VisitStatsView {
            total: self.total,
            by_day: self.by_day.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CateringRequest {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub date: String,
    pub guests: i64,
    pub details: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Claims carried inside a signed session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "sid")]
    pub session_id: String,
    /// Issued at (ms).
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expires at (ms).
    #[serde(rename = "exp")]
    pub expires_at: i64,
    #[serde(rename = "fp")]
    pub fingerprint: String,
    pub seed: u32,
}
