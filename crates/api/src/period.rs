//! Timezone-aware calendar boundaries for leaderboard periods.
//!
//! Weeks start Monday 00:00:00 and months on the 1st at 00:00:00, both in the
//! café's configured timezone, and are returned as absolute UTC instants.

use std::fmt;

use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Timelike,
    Utc,
};
use chrono_tz::Tz;
use shared::api::Period;

/// Calendar fields of an instant as seen in the configured timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl fmt::Display for ZonedParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Window covered by a leaderboard period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodMeta {
    pub start: DateTime<Utc>,
    /// Exclusive end; `None` for all-time.
    pub end: Option<DateTime<Utc>>,
    pub label: String,
}

impl PeriodMeta {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && self.end.is_none_or(|end| instant < end)
    }
}

pub const ALL_TIME_LABEL: &str = "all-time";

#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    tz: Tz,
}

impl Calendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn zoned_parts(&self, instant: DateTime<Utc>) -> ZonedParts {
        let local = instant.with_timezone(&self.tz);
        ZonedParts {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
        }
    }

    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// 00:00:00 local on `date`.
    ///
    /// When a DST change skips local midnight, midnight UTC shifted by the
    /// zone offset at that instant is used instead.
    pub fn local_midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        let naive = date.and_time(NaiveTime::MIN);
        match self.tz.from_local_datetime(&naive).earliest() {
            Some(local) => local.with_timezone(&Utc),
            None => {
                let offset = self.tz.offset_from_utc_datetime(&naive).fix();
                naive.and_utc() - TimeDelta::seconds(i64::from(offset.local_minus_utc()))
            }
        }
    }

    fn monday_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        let date = self.local_date(instant);
        date - Days::new(u64::from(date.weekday().num_days_from_monday()))
    }

    fn first_of_month(&self, instant: DateTime<Utc>) -> NaiveDate {
        let date = self.local_date(instant);
        date - Days::new(u64::from(date.day0()))
    }

    /// Monday 00:00:00 local on or before `instant`.
    pub fn week_start(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        self.local_midnight(self.monday_of(instant))
    }

    /// The 1st of the local month, 00:00:00 local.
    pub fn month_start(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        self.local_midnight(self.first_of_month(instant))
    }

    pub fn period_meta(&self, period: Period, instant: DateTime<Utc>) -> PeriodMeta {
        match period {
            Period::Weekly => {
                let monday = self.monday_of(instant);
                PeriodMeta {
                    start: self.week_start(instant),
                    end: Some(self.local_midnight(monday + Days::new(7))),
                    label: monday.format("%Y-%m-%d").to_string(),
                }
            }
            Period::Monthly => {
                let first = self.first_of_month(instant);
                let next = first
                    .checked_add_months(Months::new(1))
                    .expect("month arithmetic overflow");
                PeriodMeta {
                    start: self.month_start(instant),
                    end: Some(self.local_midnight(next)),
                    label: first.format("%Y-%m").to_string(),
                }
            }
            Period::All => PeriodMeta {
                start: DateTime::UNIX_EPOCH,
                end: None,
                label: ALL_TIME_LABEL.to_string(),
            },
        }
    }

    /// `YYYY-MM-DD` of `instant` in the local timezone.
    pub fn date_key(&self, instant: DateTime<Utc>) -> String {
        let parts = self.zoned_parts(instant);
        format!("{:04}-{:02}-{:02}", parts.year, parts.month, parts.day)
    }
}
