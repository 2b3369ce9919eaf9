use serde::{Deserialize, Serialize};

/// CLI configuration, read from `DROPPY_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Sent as `X-Admin-Token` by `droppy admin`.
    #[serde(default)]
    pub admin_token: Option<String>,
    /// Sent as `?token=` by `droppy visits`.
    #[serde(default)]
    pub visit_stats_token: Option<String>,
}

fn default_api_url() -> String {
    "http://localhost:8888".into()
}
