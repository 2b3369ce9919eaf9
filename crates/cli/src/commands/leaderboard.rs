//! Show the public leaderboard for a period.

use anyhow::Result;
use shared::api::Period;
use tabled::{Table, Tabled, settings::Style};

use crate::{api::Api, config::Config, ui};

#[derive(Tabled)]
struct LeaderboardTableRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Score")]
    score: i64,
}

pub async fn run(config: &Config, period: Period, entry_id: Option<&str>) -> Result<()> {
    let api = Api::new(config.api_url.clone());
    let board = ui::spin(
        "Fetching leaderboard...",
        api.get_leaderboard(period, entry_id),
    )
    .await?;

    ui::info(&format!("{} leaderboard ({})", board.period, board.period_start));

    if board.entries.is_empty() {
        println!("No scores yet");
    } else {
        let rows: Vec<LeaderboardTableRow> = board
            .entries
            .into_iter()
            .enumerate()
            .map(|(i, row)| LeaderboardTableRow {
                rank: i + 1,
                name: row.name,
                score: row.score,
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    match (entry_id, board.user_rank) {
        (Some(_), Some(rank)) => ui::success(&format!("Entry is ranked {}", ui::bold(&rank.to_string()))),
        (Some(id), None) => println!("Entry {} is not in this period", ui::bold(id)),
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::api::Api;
    use shared::api::{LeaderboardResponse, LeaderboardRow, Period};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[tokio::test]
    async fn get_leaderboard_sends_period_and_entry() {
        let mock_server = MockServer::start().await;

        let body = LeaderboardResponse {
            period: Period::Monthly,
            period_start: "2026-10".to_string(),
            entries: vec![LeaderboardRow {
                name: "Ana".to_string(),
                score: 1200,
            }],
            user_rank: Some(4),
        };

        Mock::given(method("GET"))
            .and(path("/api/leaderboard"))
            .and(query_param("period", "monthly"))
            .and(query_param("entryId", "entry-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let api = Api::new(mock_server.uri());
        let result = api
            .get_leaderboard(Period::Monthly, Some("entry-1"))
            .await
            .unwrap();

        assert_eq!(result.period_start, "2026-10");
        assert_eq!(result.entries[0].name, "Ana");
        assert_eq!(result.user_rank, Some(4));
    }

    #[tokio::test]
    async fn get_leaderboard_surfaces_bad_period() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/leaderboard"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"error":"unknown period 'daily' (expected weekly, monthly or all)"}"#),
            )
            .mount(&mock_server)
            .await;

        let api = Api::new(mock_server.uri());
        let err = api.get_leaderboard(Period::Weekly, None).await.unwrap_err();

        assert!(err.to_string().starts_with("unknown period"));
    }
}
