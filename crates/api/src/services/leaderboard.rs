//! Leaderboard writes and period reads.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use shared::api::{AdminEntry, LeaderboardRow};

use crate::{
    models::{LeaderboardEntry, leaderboard_order},
    period::PeriodMeta,
};

/// Rows returned by the public leaderboard.
pub const TOP_N: usize = 10;

const ADMIN_DEFAULT_LIMIT: usize = 10;
const ADMIN_MAX_LIMIT: usize = 50;

/// Drops the oldest items so one more fits without exceeding `max`.
/// `max == 0` keeps all.
pub fn make_room<T>(items: &mut Vec<T>, max: usize, created_at: impl Fn(&T) -> DateTime<Utc>) {
    if max == 0 || items.len() < max {
        return;
    }
    items.sort_by_key(|item| Reverse(created_at(item)));
    items.truncate(max - 1);
}

/// Adds `entry`, trims, re-sorts and returns the entry's 1-based rank.
///
/// Older entries are trimmed before the append so the new run always
/// survives, even when it shares a timestamp with others.
pub fn insert(
    entries: &mut Vec<LeaderboardEntry>,
    entry: LeaderboardEntry,
    max_entries: usize,
) -> Option<usize> {
    make_room(entries, max_entries, |e| e.created_at);

    let id = entry.id.clone();
    entries.push(entry);
    entries.sort_by(leaderboard_order);

    entries.iter().position(|e| e.id == id).map(|i| i + 1)
}

/// Entries inside `meta`, in leaderboard order.
pub fn in_period<'a>(entries: &'a [LeaderboardEntry], meta: &PeriodMeta) -> Vec<&'a LeaderboardEntry> {
    let mut selected: Vec<_> = entries
        .iter()
        .filter(|e| meta.contains(e.created_at))
        .collect();
    selected.sort_by(|a, b| leaderboard_order(a, b));
    selected
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    pub top: Vec<LeaderboardRow>,
    /// Rank of the focus entry within the period, if it is in it.
    pub rank: Option<usize>,
}

pub fn standings(entries: &[LeaderboardEntry], meta: &PeriodMeta, focus: Option<&str>) -> Standings {
    let ranked = in_period(entries, meta);

    let rank = focus
        .filter(|id| !id.is_empty())
        .and_then(|id| ranked.iter().position(|e| e.id == id))
        .map(|i| i + 1);

    Standings {
        top: ranked.iter().take(TOP_N).map(|e| e.row()).collect(),
        rank,
    }
}

/// Parses the admin `limit` query value: 10 when missing, zero or
/// unparseable, then clamped to 1..=50.
pub fn admin_limit(raw: Option<&str>) -> usize {
    let requested = raw
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n != 0)
        .unwrap_or(ADMIN_DEFAULT_LIMIT as i64);

    requested.clamp(1, ADMIN_MAX_LIMIT as i64) as usize
}

pub fn admin_listing(entries: &[LeaderboardEntry], meta: &PeriodMeta, limit: usize) -> Vec<AdminEntry> {
    in_period(entries, meta)
        .into_iter()
        .take(limit)
        .map(LeaderboardEntry::admin_view)
        .collect()
}
