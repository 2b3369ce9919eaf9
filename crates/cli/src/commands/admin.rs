//! List full leaderboard entries, including contact details, for café staff.

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_humanize::HumanTime;
use shared::api::Period;
use tabled::{Table, Tabled, settings::Style};

use crate::{api::Api, config::Config, ui};

#[derive(Tabled)]
struct AdminRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Contact")]
    contact: String,
    #[tabled(rename = "Score")]
    score: i64,
    #[tabled(rename = "Submitted")]
    submitted: String,
}

pub async fn run(config: &Config, period: Period, limit: u32) -> Result<()> {
    let token = config
        .admin_token
        .as_deref()
        .context("Admin token not set. Export DROPPY_ADMIN_TOKEN.")?;

    let api = Api::new(config.api_url.clone());
    let listing = ui::spin(
        "Fetching entries...",
        api.get_admin_entries(token, period, limit),
    )
    .await?;

    ui::info(&format!("{} entries ({})", listing.period, listing.period_start));

    if listing.entries.is_empty() {
        println!("No entries");
        return Ok(());
    }

    let rows: Vec<AdminRow> = listing
        .entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| AdminRow {
            rank: i + 1,
            name: entry.name,
            contact: entry.contact,
            score: entry.score,
            submitted: DateTime::from_timestamp_millis(entry.created_at)
                .map(|at| HumanTime::from(at).to_string())
                .unwrap_or_default(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::api::{AdminEntry, AdminResponse};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    #[tokio::test]
    async fn get_admin_entries_sends_token_header() {
        let mock_server = MockServer::start().await;

        let body = AdminResponse {
            period: Period::Weekly,
            period_start: "2026-10-12".to_string(),
            entries: vec![AdminEntry {
                id: "entry-1".to_string(),
                name: "Ana".to_string(),
                contact: "@ana".to_string(),
                phone: None,
                score: 900,
                distance: 850,
                collectibles: 3,
                max_combo: 2,
                duration_ms: 40_000,
                created_at: 1_792_000_000_000,
            }],
        };

        Mock::given(method("GET"))
            .and(path("/api/admin"))
            .and(header("X-Admin-Token", "staff"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let api = Api::new(mock_server.uri());
        let result = api
            .get_admin_entries("staff", Period::Weekly, 25)
            .await
            .unwrap();

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].contact, "@ana");
    }

    #[tokio::test]
    async fn get_admin_entries_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/admin"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"Unauthorized"}"#))
            .mount(&mock_server)
            .await;

        let api = Api::new(mock_server.uri());
        let err = api
            .get_admin_entries("wrong", Period::All, 10)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[tokio::test]
    async fn run_requires_admin_token() {
        let config = Config {
            api_url: "http://127.0.0.1:1".to_string(),
            admin_token: None,
            visit_stats_token: None,
        };

        let err = run(&config, Period::Weekly, 10).await.unwrap_err();

        assert!(err.to_string().contains("DROPPY_ADMIN_TOKEN"));
    }
}
