//! Request a game session and show its seed.

use anyhow::Result;
use chrono::DateTime;
use chrono_humanize::HumanTime;

use crate::{api::Api, config::Config, ui};

pub async fn run(config: &Config) -> Result<()> {
    let api = Api::new(config.api_url.clone());
    let session = ui::spin("Requesting session...", api.create_session()).await?;

    ui::success(&format!("Session for week {}", ui::bold(&session.week_start)));
    println!("Seed:    {}", session.seed);
    if let Some(expires) = DateTime::from_timestamp_millis(session.expires_at) {
        println!("Expires: {}", HumanTime::from(expires));
    }
    println!("Token:   {}", session.token);

    Ok(())
}
