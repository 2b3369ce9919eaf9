//! Plausibility bounds for submitted game runs.
//!
//! The client reports its own metrics, so the server only checks that they
//! are physically possible for the claimed duration.

use shared::api::SubmitScorePayload;

use crate::config::Config;

const MIN_DURATION_SECS: f64 = 1.0;
const MAX_DURATION_SECS: f64 = 600.0;
const DISTANCE_SLACK: f64 = 50.0;
const COLLECTIBLES_SLACK: f64 = 5.0;
const SCORE_SLACK: i64 = 200;

/// Metrics claimed for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMetrics {
    pub score: i64,
    pub distance: i64,
    pub collectibles: i64,
    pub max_combo: i64,
    pub duration_ms: i64,
}

impl From<&SubmitScorePayload> for RunMetrics {
    fn from(payload: &SubmitScorePayload) -> Self {
        Self {
            score: payload.score,
            distance: payload.distance,
            collectibles: payload.collectibles,
            max_combo: payload.max_combo,
            duration_ms: payload.duration_ms,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlausibilityBounds {
    pub max_distance_per_sec: i64,
    pub max_score_per_sec: i64,
    pub max_collectibles_per_sec: i64,
    pub max_combo: i64,
}

impl PlausibilityBounds {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_distance_per_sec: config.max_distance_per_sec,
            max_score_per_sec: config.max_score_per_sec,
            max_collectibles_per_sec: config.max_collectibles_per_sec,
            max_combo: config.max_combo,
        }
    }

    /// Returns the user-facing reason for the first failed bound.
    pub fn check(&self, run: &RunMetrics) -> Result<(), &'static str> {
        let secs = run.duration_ms as f64 / 1000.0;
        if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&secs) {
            return Err("Invalid duration.");
        }

        let max_distance = secs * self.max_distance_per_sec as f64 + DISTANCE_SLACK;
        if run.distance < 0 || run.distance as f64 > max_distance {
            return Err("Invalid distance.");
        }

        let max_collectibles = secs * self.max_collectibles_per_sec as f64 + COLLECTIBLES_SLACK;
        if run.collectibles < 0 || run.collectibles as f64 > max_collectibles {
            return Err("Invalid collectibles.");
        }

        if run.max_combo < 1 || run.max_combo > self.max_combo {
            return Err("Invalid combo.");
        }

        let max_score = secs * self.max_score_per_sec as f64 + SCORE_SLACK as f64;
        if run.score < 0 || run.score as f64 > max_score {
            return Err("Score out of range.");
        }

        let reachable = run
            .collectibles
            .saturating_mul(run.max_combo)
            .saturating_add(run.distance)
            .saturating_add(SCORE_SLACK);
        if run.score > reachable {
            return Err("Score does not match the run.");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> PlausibilityBounds {
        PlausibilityBounds {
            max_distance_per_sec: 70,
            max_score_per_sec: 180,
            max_collectibles_per_sec: 3,
            max_combo: 5,
        }
    }

    fn run(duration_ms: i64, distance: i64, score: i64) -> RunMetrics {
        RunMetrics {
            score,
            distance,
            collectibles: 0,
            max_combo: 1,
            duration_ms,
        }
    }

    #[test]
    fn huge_combo_limit_does_not_overflow() {
        let bounds = PlausibilityBounds {
            max_combo: i64::MAX,
            ..bounds()
        };
        let run = RunMetrics {
            score: 700,
            distance: 700,
            collectibles: 30,
            max_combo: i64::MAX,
            duration_ms: 10_000,
        };

        assert_eq!(bounds.check(&run), Ok(()));
    }

    #[test]
    fn accepts_plausible_run() {
        assert_eq!(bounds().check(&run(10_000, 700, 700)), Ok(()));
    }

    #[test]
    fn rejects_distance_beyond_speed_limit() {
        // 10s * 70 + 50 = 750
        assert_eq!(bounds().check(&run(10_000, 1000, 700)), Err("Invalid distance."));
        assert_eq!(bounds().check(&run(10_000, 750, 700)), Ok(()));
        assert_eq!(bounds().check(&run(10_000, 751, 700)), Err("Invalid distance."));
    }

    #[test]
    fn rejects_durations_outside_one_to_six_hundred_seconds() {
        assert_eq!(bounds().check(&run(999, 0, 0)), Err("Invalid duration."));
        assert_eq!(bounds().check(&run(1000, 0, 0)), Ok(()));
        assert_eq!(bounds().check(&run(600_000, 0, 0)), Ok(()));
        assert_eq!(bounds().check(&run(600_001, 0, 0)), Err("Invalid duration."));
    }

    #[test]
    fn rejects_negative_metrics() {
        assert_eq!(bounds().check(&run(10_000, -1, 0)), Err("Invalid distance."));
        assert_eq!(bounds().check(&run(10_000, 10, -1)), Err("Score out of range."));
    }

    #[test]
    fn combo_must_be_within_configured_range() {
        let mut metrics = run(10_000, 100, 100);
        metrics.max_combo = 0;
        assert_eq!(bounds().check(&metrics), Err("Invalid combo."));

        metrics.max_combo = 6;
        assert_eq!(bounds().check(&metrics), Err("Invalid combo."));
    }

    #[test]
    fn collectibles_scale_with_duration() {
        // 10s * 3 + 5 = 35
        let mut metrics = run(10_000, 100, 100);
        metrics.collectibles = 35;
        assert_eq!(bounds().check(&metrics), Ok(()));

        metrics.collectibles = 36;
        assert_eq!(bounds().check(&metrics), Err("Invalid collectibles."));
    }

    #[test]
    fn score_must_be_explained_by_components() {
        // 100 + 10 * 5 + 200 = 350
        let mut metrics = run(10_000, 100, 350);
        metrics.collectibles = 10;
        metrics.max_combo = 5;
        assert_eq!(bounds().check(&metrics), Ok(()));

        metrics.score = 351;
        assert_eq!(bounds().check(&metrics), Err("Score does not match the run."));
    }

    #[test]
    fn score_capped_by_duration() {
        // 1s * 180 + 200 = 380, components allow more
        let mut metrics = run(1000, 100, 381);
        metrics.collectibles = 8;
        metrics.max_combo = 5;

        assert_eq!(bounds().check(&metrics), Err("Score out of range."));
    }
}
