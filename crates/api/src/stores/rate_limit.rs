//! Rate limiting over the state document's `rate` map.
//!
//! Two rules per key: a cooldown between accepted attempts, and a cap on
//! accepted attempts inside a 60 second window. The caller owns the map and
//! is responsible for saving the document afterwards.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::RateRecord;

const WINDOW_MS: i64 = 60 * 1000;
const RECORD_TTL_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub cooldown_secs: i64,
    pub max_per_minute: u32,
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Attempt recorded.
    Allowed,
    /// Over the limit; retry after this many seconds.
    Exceeded(u64),
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    policy: RateLimitPolicy,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self { policy }
    }

    /// Check `key` and record the attempt if it is allowed.
    ///
    /// Records idle for more than a day are dropped on every call.
    pub fn check_and_record(
        &self,
        rate: &mut HashMap<String, RateRecord>,
        key: &str,
        now: DateTime<Utc>,
    ) -> RateLimitResult {
        let now_ms = now.timestamp_millis();
        prune(rate, now_ms);

        let mut record = rate.get(key).copied().unwrap_or(RateRecord {
            last: 0,
            window_start: now_ms,
            count: 0,
        });

        let cooldown_ms = self.policy.cooldown_secs.saturating_mul(1000);
        let elapsed = now_ms.saturating_sub(record.last);
        if record.last > 0 && elapsed < cooldown_ms {
            let remaining = cooldown_ms - elapsed;
            return RateLimitResult::Exceeded((remaining.saturating_add(999) / 1000) as u64);
        }

        if now_ms - record.window_start > WINDOW_MS {
            record.window_start = now_ms;
            record.count = 0;
        }

        if record.count >= self.policy.max_per_minute {
            return RateLimitResult::Exceeded((WINDOW_MS / 1000) as u64);
        }

        record.last = now_ms;
        record.count += 1;
        rate.insert(key.to_string(), record);

        RateLimitResult::Allowed
    }
}

fn prune(rate: &mut HashMap<String, RateRecord>, now_ms: i64) {
    let cutoff = now_ms - RECORD_TTL_MS;
    rate.retain(|_, record| record.last >= cutoff);
}
