//! HTTP client for the Droppy Dash API.

use anyhow::Result;
use reqwest::{Client, Response};
use shared::api::{
    AdminResponse, CateringPayload, CateringResponse, LeaderboardResponse, Period,
    SessionResponse, VisitStatsResponse,
};

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

pub struct Api {
    pub http: Client,
    pub base_url: String,
}

impl Api {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Requests a new game session (token + seed).
    pub async fn create_session(&self) -> Result<SessionResponse> {
        let response = Self::check_response(
            self.http
                .post(format!("{}/api/session", self.base_url))
                .send()
                .await?,
        )
        .await?;

        Ok(response.json().await?)
    }

    /// Fetches the public top 10 for a period, with the rank of `entry_id`.
    pub async fn get_leaderboard(
        &self,
        period: Period,
        entry_id: Option<&str>,
    ) -> Result<LeaderboardResponse> {
        let mut query = vec![("period", period.as_str())];
        if let Some(id) = entry_id {
            query.push(("entryId", id));
        }

        let response = Self::check_response(
            self.http
                .get(format!("{}/api/leaderboard", self.base_url))
                .query(&query)
                .send()
                .await?,
        )
        .await?;

        Ok(response.json().await?)
    }

    /// Fetches full entries, including contact details.
    pub async fn get_admin_entries(
        &self,
        token: &str,
        period: Period,
        limit: u32,
    ) -> Result<AdminResponse> {
        let response = Self::check_response(
            self.http
                .get(format!("{}/api/admin", self.base_url))
                .header(ADMIN_TOKEN_HEADER, token)
                .query(&[("period", period.as_str().to_string()), ("limit", limit.to_string())])
                .send()
                .await?,
        )
        .await?;

        Ok(response.json().await?)
    }

    /// Submits a catering request.
    pub async fn submit_catering(&self, payload: &CateringPayload) -> Result<CateringResponse> {
        let response = Self::check_response(
            self.http
                .post(format!("{}/api/catering", self.base_url))
                .json(payload)
                .send()
                .await?,
        )
        .await?;

        Ok(response.json().await?)
    }

    /// Fetches visit counters.
    pub async fn get_visit_stats(&self, token: &str) -> Result<VisitStatsResponse> {
        let response = Self::check_response(
            self.http
                .get(format!("{}/api/visit-stats", self.base_url))
                .query(&[("token", token)])
                .send()
                .await?,
        )
        .await?;

        Ok(response.json().await?)
    }

    async fn check_response(response: Response) -> Result<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // Try to extract error message from JSON response
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|json| {
                    let error = json.get("error").and_then(|v| v.as_str())?.to_string();
                    match json.get("retryAfter").and_then(|v| v.as_u64()) {
                        Some(secs) => Some(format!("{} (retry in {}s)", error, secs)),
                        None => Some(error),
                    }
                })
                .unwrap_or_else(|| {
                    if body.is_empty() {
                        status
                            .canonical_reason()
                            .unwrap_or("Request failed")
                            .to_string()
                    } else {
                        body
                    }
                });

            anyhow::bail!("{}", message);
        }

        Ok(response)
    }
}
