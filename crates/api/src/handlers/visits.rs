//! Site visit counter.
//!
//! ## Endpoints
//!
//! - POST /api/visit - Count a visit, at most once per device per
//!   `VISIT_TTL_SECS`
//! - GET /api/visit-stats?token= - Totals and per-day counts, requires the
//!   configured stats token

use axum::{
    Json, Router, debug_handler,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use shared::api::{VisitResponse, VisitStatsResponse};

use crate::{
    error::AppError,
    middleware::{client::ClientFingerprint, tokens_match},
    services::visits::{self, VisitWindow},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/visit", post(record_visit))
        .route("/visit-stats", get(visit_stats))
}

#[debug_handler]
async fn record_visit(
    State(state): State<AppState>,
    fingerprint: ClientFingerprint,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let mut doc = state.stores.state.load().await?;

    let counted = visits::record(
        &mut doc.visit_stats,
        &fingerprint.0,
        state.calendar.date_key(now),
        now,
        VisitWindow::from_config(&state.config),
    );

    if counted {
        state.stores.state.save(&doc).await?;
    }

    Ok(Json(VisitResponse { ok: true, counted }))
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub token: Option<String>,
}

#[debug_handler]
async fn visit_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let authorized = match (
        state.config.visit_stats_token.as_deref(),
        query.token.as_deref(),
    ) {
        (Some(expected), Some(provided)) if !expected.is_empty() => {
            tokens_match(provided, expected)
        }
        _ => false,
    };
    if !authorized {
        return Err(AppError::External(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    let doc = state.stores.state.load().await?;

    Ok(Json(VisitStatsResponse {
        ok: true,
        visit_stats: doc.visit_stats.view(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        stores::MemoryStateStore,
        test_utils::{TEST_STATS_TOKEN, TestStateBuilder},
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;

    async fn visit(state: &AppState, fingerprint: &str) -> VisitResponse {
        let response = record_visit(State(state.clone()), ClientFingerprint(fingerprint.into()))
            .await
            .unwrap()
            .into_response();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn stats_query(token: Option<&str>) -> Query<StatsQuery> {
        Query(StatsQuery {
            token: token.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn second_visit_from_same_device_is_not_counted() {
        let store = Arc::new(MemoryStateStore::new());
        let state = TestStateBuilder::new().with_memory_store(store.clone()).build();

        assert!(visit(&state, "fp").await.counted);
        assert!(!visit(&state, "fp").await.counted);
        assert!(visit(&state, "other").await.counted);

        let stats = store.snapshot().unwrap().visit_stats;
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_day.values().sum::<u64>(), 2);
    }

    #[tokio::test]
    async fn stats_require_token() {
        let state = TestStateBuilder::new().build();

        for token in [None, Some("wrong")] {
            let Err(err) = visit_stats(State(state.clone()), stats_query(token)).await else {
                panic!("Expected unauthorized");
            };
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn stats_unavailable_without_configured_token() {
        let mut config = crate::test_utils::test_config();
        config.visit_stats_token = None;
        let state = TestStateBuilder::new().with_config(config).build();

        let Err(err) = visit_stats(State(state), stats_query(Some(""))).await else {
            panic!("Expected unauthorized");
        };
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn stats_report_totals() {
        let state = TestStateBuilder::new().build();
        visit(&state, "a").await;
        visit(&state, "b").await;

        let response = visit_stats(State(state), stats_query(Some(TEST_STATS_TOKEN)))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let stats: VisitStatsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(stats.visit_stats.total, 2);
    }
}
