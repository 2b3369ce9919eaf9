//! Staff view of the leaderboard with contact details.
//!
//! ## Endpoints
//!
//! - GET /api/admin?period=&limit= - Full entries for the period, requires
//!   `X-Admin-Token`

use axum::{
    Json, Router, debug_handler,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use shared::api::AdminResponse;

use super::leaderboard::parse_period;
use crate::{
    error::AppError, middleware::admin::AdminAccess, services::leaderboard, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_entries))
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub period: Option<String>,
    pub limit: Option<String>,
}

#[debug_handler]
async fn list_entries(
    _admin: AdminAccess,
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<impl IntoResponse, AppError> {
    let period = parse_period(query.period.as_deref())?;
    let limit = leaderboard::admin_limit(query.limit.as_deref());
    let meta = state.calendar.period_meta(period, Utc::now());

    let doc = state.stores.state.load().await?;
    let entries = leaderboard::admin_listing(&doc.entries, &meta, limit);

    tracing::info!(%period, limit, returned = entries.len(), "Admin listing");

    Ok(Json(AdminResponse {
        period,
        period_start: meta.label,
        entries,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{LeaderboardEntry, StateDocument},
        stores::MemoryStateStore,
        test_utils::TestStateBuilder,
    };
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use std::sync::Arc;

    fn entry(i: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            id: format!("e{}", i),
            name: format!("Player {}", i),
            contact: format!("55000000{:02}", i),
            phone: Some(format!("55000000{:02}", i)),
            score: 100 + i,
            distance: 100,
            collectibles: 0,
            max_combo: 1,
            duration_ms: 20_000,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn lists_full_entries_up_to_limit() {
        let doc = StateDocument {
            entries: (0..5).map(entry).collect(),
            ..Default::default()
        };
        let store = Arc::new(MemoryStateStore::with_document(doc));
        let state = TestStateBuilder::new().with_memory_store(store).build();
        let query = AdminQuery {
            period: Some("all".into()),
            limit: Some("3".into()),
        };

        let response = list_entries(AdminAccess, State(state), Query(query))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let listing: AdminResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(listing.entries.len(), 3);
        assert_eq!(listing.entries[0].id, "e4");
        assert_eq!(listing.entries[0].phone.as_deref(), Some("5500000004"));
    }
}
