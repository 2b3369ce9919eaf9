use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Secret used when `DROPPY_SECRET` is unset. Refused in production.
pub const DEV_SECRET: &str = "dev-secret-change-me";

const MAX_COMBO_LIMIT: i64 = 1_000;
const MAX_COOLDOWN_SECONDS: i64 = 24 * 60 * 60;
const MAX_PER_SEC_LIMIT: i64 = 1_000_000;

/// Server configuration, read from `DROPPY_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Set to "production" for JSON logging, anything else for human-readable.
    #[serde(default)]
    pub env: String,
    /// Sentry DSN for error tracking
    #[serde(default)]
    pub sentry_dsn: Option<String>,
    /// Redis URL for the state document. Unset keeps state in process memory.
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Store namespace; the document lives at `{store}:leaderboard`.
    #[serde(default = "default_store")]
    pub store: String,
    /// HMAC key for session tokens.
    #[serde(default = "default_secret")]
    pub secret: String,
    /// IANA timezone used for week/month boundaries and visit day keys.
    #[serde(default = "default_week_tz")]
    pub week_tz: String,
    #[serde(default = "default_session_ttl_ms")]
    pub session_ttl_ms: i64,
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: i64,
    #[serde(default = "default_max_per_minute")]
    pub max_per_minute: u32,
    /// Leaderboard size cap, 0 disables trimming.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_max_distance_per_sec")]
    pub max_distance_per_sec: i64,
    #[serde(default = "default_max_score_per_sec")]
    pub max_score_per_sec: i64,
    #[serde(default = "default_max_collectibles_per_sec")]
    pub max_collectibles_per_sec: i64,
    #[serde(default = "default_max_combo")]
    pub max_combo: i64,
    /// Shared secret for `X-Admin-Token`. Admin listing is disabled when unset.
    #[serde(default)]
    pub admin_token: Option<String>,
    /// Query token for the visit statistics endpoint.
    #[serde(default)]
    pub visit_stats_token: Option<String>,
    #[serde(default)]
    pub fingerprint_salt: String,
    /// Take the client IP from edge proxy headers (`x-nf-client-connection-ip`,
    /// `client-ip`, `x-forwarded-for`). Leave off unless a proxy overwrites
    /// them; otherwise the socket peer address is used.
    #[serde(default)]
    pub trust_proxy_headers: bool,
    #[serde(default = "default_catering_max_entries")]
    pub catering_max_entries: usize,
    #[serde(default = "default_catering_max_details")]
    pub catering_max_details: usize,
    #[serde(default = "default_catering_max_guests")]
    pub catering_max_guests: i64,
    #[serde(default = "default_visit_ttl_secs")]
    pub visit_ttl_secs: i64,
    #[serde(default = "default_visit_max_age_secs")]
    pub visit_max_age_secs: i64,
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }

    /// Parsed leaderboard timezone.
    pub fn timezone(&self) -> Result<Tz> {
        self.week_tz
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("invalid DROPPY_WEEK_TZ '{}'", self.week_tz))
    }

    /// Checks settings that would otherwise fail at request time.
    pub fn validate(&self) -> Result<()> {
        self.timezone()?;

        if self.is_production() && self.secret == DEV_SECRET {
            anyhow::bail!("DROPPY_SECRET must be set in production");
        }
        if self.secret.is_empty() {
            anyhow::bail!("DROPPY_SECRET must not be empty");
        }
        if self.session_ttl_ms <= 0 {
            anyhow::bail!("DROPPY_SESSION_TTL_MS must be positive");
        }
        if !(1..=MAX_COMBO_LIMIT).contains(&self.max_combo) {
            anyhow::bail!("DROPPY_MAX_COMBO must be between 1 and {}", MAX_COMBO_LIMIT);
        }
        if !(0..=MAX_COOLDOWN_SECONDS).contains(&self.cooldown_seconds) {
            anyhow::bail!(
                "DROPPY_COOLDOWN_SECONDS must be between 0 and {}",
                MAX_COOLDOWN_SECONDS
            );
        }
        for (name, value) in [
            ("DROPPY_MAX_DISTANCE_PER_SEC", self.max_distance_per_sec),
            ("DROPPY_MAX_SCORE_PER_SEC", self.max_score_per_sec),
            ("DROPPY_MAX_COLLECTIBLES_PER_SEC", self.max_collectibles_per_sec),
        ] {
            if !(0..=MAX_PER_SEC_LIMIT).contains(&value) {
                anyhow::bail!("{} must be between 0 and {}", name, MAX_PER_SEC_LIMIT);
            }
        }

        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8888
}

fn default_store() -> String {
    "droppy-dash".into()
}

fn default_secret() -> String {
    DEV_SECRET.into()
}

fn default_week_tz() -> String {
    "America/Mexico_City".into()
}

fn default_session_ttl_ms() -> i64 {
    15 * 60 * 1000
}

fn default_cooldown_seconds() -> i64 {
    12
}

fn default_max_per_minute() -> u32 {
    6
}

fn default_max_entries() -> usize {
    10_000
}

fn default_max_distance_per_sec() -> i64 {
    70
}

fn default_max_score_per_sec() -> i64 {
    180
}

fn default_max_collectibles_per_sec() -> i64 {
    3
}

fn default_max_combo() -> i64 {
    5
}

fn default_catering_max_entries() -> usize {
    2000
}

fn default_catering_max_details() -> usize {
    600
}

fn default_catering_max_guests() -> i64 {
    1000
}

fn default_visit_ttl_secs() -> i64 {
    6 * 60 * 60
}

fn default_visit_max_age_secs() -> i64 {
    7 * 24 * 60 * 60
}
