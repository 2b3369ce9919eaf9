//! Shared API request/response types used by both the CLI and the API server.
//!
//! Field names follow the browser client's camelCase JSON. Timestamps are
//! integer milliseconds since the Unix epoch.

use std::{collections::BTreeMap, fmt, str::FromStr};

use garde::Validate;
use serde::{Deserialize, Serialize};

/// Leaderboard scoping window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Weekly,
    Monthly,
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::All => "all",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a period string is outside {weekly, monthly, all}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPeriod(pub String);

impl fmt::Display for UnknownPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown period '{}' (expected weekly, monthly or all)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPeriod {}

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "all" => Ok(Period::All),
            _ => Err(UnknownPeriod(s.to_string())),
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// Returned by `POST /api/session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Signed session token, redeemed once by a score submission.
    pub token: String,
    /// Seed for the game's procedural generation (see [`crate::rng::Mulberry32`]).
    pub seed: u32,
    pub expires_at: i64,
    /// Label of the current leaderboard week (`YYYY-MM-DD`).
    pub week_start: String,
}

/// Final metrics of one game run, posted to `POST /api/score`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScorePayload {
    #[garde(length(min = 1))]
    pub token: String,
    #[garde(skip)]
    #[serde(default)]
    pub name: String,
    /// Instagram handle or phone number.
    #[garde(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Older clients send the contact under this name.
    #[garde(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[garde(skip)]
    pub score: i64,
    #[garde(skip)]
    pub distance: i64,
    #[garde(skip)]
    pub collectibles: i64,
    #[garde(skip)]
    pub max_combo: i64,
    #[garde(skip)]
    pub duration_ms: i64,
}

impl SubmitScorePayload {
    /// The contact field, falling back to the legacy `phone` field.
    pub fn raw_contact(&self) -> &str {
        self.contact
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or(self.phone.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreResponse {
    pub ok: bool,
    pub entry_id: String,
    /// 1-based position in the all-time leaderboard after the write.
    pub rank: usize,
}

/// Public leaderboard row. Never carries contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub name: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub period: Period,
    /// `YYYY-MM-DD` for weekly, `YYYY-MM` for monthly, `all-time` otherwise.
    pub period_start: String,
    pub entries: Vec<LeaderboardRow>,
    pub user_rank: Option<usize>,
}

/// Full leaderboard entry as seen by the café staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEntry {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub phone: Option<String>,
    pub score: i64,
    pub distance: i64,
    pub collectibles: i64,
    pub max_combo: i64,
    pub duration_ms: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub period: Period,
    pub period_start: String,
    pub entries: Vec<AdminEntry>,
}

/// Catering request form, posted to `POST /api/catering`.
///
/// Checked field by field on the server so each rejection carries its own
/// message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CateringPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "phone")]
    pub contact: String,
    /// Event date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub guests: i64,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CateringResponse {
    pub ok: bool,
    pub request_id: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitResponse {
    pub ok: bool,
    /// False when this fingerprint was already counted recently.
    pub counted: bool,
}

/// Aggregated visit counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStatsView {
    pub total: u64,
    pub by_day: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStatsResponse {
    pub ok: bool,
    pub visit_stats: VisitStatsView,
}
