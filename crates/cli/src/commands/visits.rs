//! Show visit counters.

use anyhow::{Context, Result};
use tabled::{Table, Tabled, settings::Style};

use crate::{api::Api, config::Config, ui};

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Visits")]
    visits: u64,
}

pub async fn run(config: &Config, days: usize) -> Result<()> {
    let token = config
        .visit_stats_token
        .as_deref()
        .context("Stats token not set. Export DROPPY_VISIT_STATS_TOKEN.")?;

    let api = Api::new(config.api_url.clone());
    let stats = ui::spin("Fetching visits...", api.get_visit_stats(token)).await?;

    ui::info(&format!("{} visits in total", ui::bold(&stats.visit_stats.total.to_string())));

    // Newest first
    let rows: Vec<DayRow> = stats
        .visit_stats
        .by_day
        .into_iter()
        .rev()
        .take(days)
        .map(|(day, visits)| DayRow { day, visits })
        .collect();

    if !rows.is_empty() {
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::api::Api;
    use shared::api::{VisitStatsResponse, VisitStatsView};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[tokio::test]
    async fn get_visit_stats_passes_token() {
        let mock_server = MockServer::start().await;

        let view = VisitStatsView {
            total: 3,
            by_day: [("2026-10-12".to_string(), 3)].into(),
        };

        Mock::given(method("GET"))
            .and(path("/api/visit-stats"))
            .and(query_param("token", "stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(VisitStatsResponse {
                ok: true,
                visit_stats: view,
            }))
            .mount(&mock_server)
            .await;

        let api = Api::new(mock_server.uri());
        let result = api.get_visit_stats("stats").await.unwrap();

        assert_eq!(result.visit_stats.total, 3);
        assert_eq!(result.visit_stats.by_day["2026-10-12"], 3);
    }
}
