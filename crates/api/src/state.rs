use anyhow::Result;

use crate::{
    config::Config,
    period::Calendar,
    stores::{RateLimitPolicy, RateLimiter, Stores},
    token::TokenCodec,
};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// State document storage (Redis or in-memory).
    pub stores: Stores,
    /// Session token signer.
    pub tokens: TokenCodec,
    /// Leaderboard calendar in the configured timezone.
    pub calendar: Calendar,
    /// Cooldown and per-minute caps for submissions.
    pub limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: Config, stores: Stores) -> Result<Self> {
        let calendar = Calendar::new(config.timezone()?);
        let tokens = TokenCodec::new(&config.secret);
        let limiter = RateLimiter::new(RateLimitPolicy {
            cooldown_secs: config.cooldown_seconds,
            max_per_minute: config.max_per_minute,
        });

        Ok(Self {
            config,
            stores,
            tokens,
            calendar,
            limiter,
        })
    }
}
