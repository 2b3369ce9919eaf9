//! Public leaderboard.
//!
//! ## Endpoints
//!
//! - GET /api/leaderboard?period=weekly|monthly|all&entryId= - Top 10 of the
//!   period plus the rank of `entryId` within it

use axum::{
    Json, Router, debug_handler,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use shared::api::{LeaderboardResponse, Period};

use crate::{error::AppError, services::leaderboard, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_leaderboard))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    pub period: Option<String>,
    pub entry_id: Option<String>,
}

/// Parses an optional `period` query value; blank means weekly.
pub fn parse_period(raw: Option<&str>) -> Result<Period, AppError> {
    match raw.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => p
            .parse::<Period>()
            .map_err(|e| AppError::Validation(e.to_string())),
        None => Ok(Period::default()),
    }
}

#[debug_handler]
async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let period = parse_period(query.period.as_deref())?;
    let meta = state.calendar.period_meta(period, Utc::now());

    let doc = state.stores.state.load().await?;
    let standings = leaderboard::standings(&doc.entries, &meta, query.entry_id.as_deref());

    Ok(Json(LeaderboardResponse {
        period,
        period_start: meta.label,
        entries: standings.top,
        user_rank: standings.rank,
    }))
}
