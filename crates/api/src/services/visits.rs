//! Visit counting.
//!
//! A fingerprint is counted at most once per `ttl`. Fingerprints not seen
//! for `max_age` are forgotten so the map stays bounded.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{config::Config, models::VisitStats};

#[derive(Debug, Clone, Copy)]
pub struct VisitWindow {
    pub ttl: TimeDelta,
    pub max_age: TimeDelta,
}

impl VisitWindow {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ttl: TimeDelta::seconds(config.visit_ttl_secs),
            max_age: TimeDelta::seconds(config.visit_max_age_secs),
        }
    }
}

/// Records a visit and returns whether it was counted.
pub fn record(
    stats: &mut VisitStats,
    fingerprint: &str,
    day_key: String,
    now: DateTime<Utc>,
    window: VisitWindow,
) -> bool {
    let now_ms = now.timestamp_millis();
    let max_age_ms = window.max_age.num_milliseconds();
    stats
        .last_by_fp
        .retain(|_, last| now_ms - *last <= max_age_ms);

    let last_seen = stats.last_by_fp.get(fingerprint).copied().unwrap_or(0);
    if now_ms - last_seen < window.ttl.num_milliseconds() {
        return false;
    }

    stats.last_by_fp.insert(fingerprint.to_string(), now_ms);
    stats.total += 1;
    *stats.by_day.entry(day_key).or_insert(0) += 1;

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> VisitWindow {
        VisitWindow {
            ttl: TimeDelta::hours(6),
            max_age: TimeDelta::days(7),
        }
    }

    fn t0() -> DateTime<Utc> {
        "2026-10-15T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn repeat_visit_within_ttl_is_not_counted() {
        let mut stats = VisitStats::default();

        assert!(record(&mut stats, "fp", "2026-10-15".into(), t0(), window()));
        assert!(!record(
            &mut stats,
            "fp",
            "2026-10-15".into(),
            t0() + TimeDelta::hours(5),
            window()
        ));

        assert_eq!(stats.total, 1);
        assert_eq!(stats.by_day["2026-10-15"], 1);
    }

    #[test]
    fn counts_again_after_ttl() {
        let mut stats = VisitStats::default();
        record(&mut stats, "fp", "2026-10-15".into(), t0(), window());

        let counted = record(
            &mut stats,
            "fp",
            "2026-10-16".into(),
            t0() + TimeDelta::hours(6),
            window(),
        );

        assert!(counted);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_day["2026-10-16"], 1);
    }

    #[test]
    fn distinct_fingerprints_count_separately() {
        let mut stats = VisitStats::default();
        record(&mut stats, "a", "2026-10-15".into(), t0(), window());
        record(&mut stats, "b", "2026-10-15".into(), t0(), window());

        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_day["2026-10-15"], 2);
    }

    #[test]
    fn forgets_fingerprints_older_than_max_age() {
        let mut stats = VisitStats::default();
        stats.last_by_fp.insert(
            "stale".into(),
            (t0() - TimeDelta::days(8)).timestamp_millis(),
        );

        record(&mut stats, "fresh", "2026-10-15".into(), t0(), window());

        assert!(!stats.last_by_fp.contains_key("stale"));
        assert!(stats.last_by_fp.contains_key("fresh"));
    }
}
