//! Submit a catering request from the terminal.

use anyhow::Result;
use chrono::NaiveDate;
use shared::api::CateringPayload;

use crate::{api::Api, config::Config, ui};

pub struct CateringArgs {
    pub name: String,
    pub contact: String,
    pub date: NaiveDate,
    pub guests: i64,
    pub details: String,
}

pub async fn run(config: &Config, args: CateringArgs) -> Result<()> {
    let payload = CateringPayload {
        name: args.name,
        contact: args.contact,
        date: args.date.format("%Y-%m-%d").to_string(),
        guests: args.guests,
        details: args.details,
    };

    let api = Api::new(config.api_url.clone());
    let response = ui::spin("Sending request...", api.submit_catering(&payload)).await?;

    ui::success(&format!("Request sent ({})", ui::bold(&response.request_id)));

    Ok(())
}
