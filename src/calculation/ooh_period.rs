//! Out-of-hours classification of on-call shifts.
//!
//! A shift is walked one local calendar day at a time in its own timezone.
//! A day counts as an OOH night when, measured from that day's step instant:
//!
//! 1. the shift ends on a different local calendar date,
//! 2. the shift is still running at 17:30 local time on that day, and
//! 3. at least six hours of real elapsed time remain before the shift ends.
//!
//! Steps advance by one calendar day (same local wall time on the next date),
//! so a 23 or 25 hour DST day is still a single step. Elapsed time is always
//! measured between absolute instants.

use chrono::{
    DateTime, Days, LocalResult, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::CompensationResult;
use crate::models::ShiftInterval;

use super::day_bucket::{DayBucket, OohDay};

/// Local time of day after which a continuing shift is out of hours.
pub const END_OF_BUSINESS: NaiveTime = match NaiveTime::from_hms_opt(17, 30, 0) {
    Some(time) => time,
    None => panic!("17:30 is a valid time of day"),
};

/// Minimum real elapsed time, in hours, between a day's step and the end of the shift.
pub const MIN_OOH_HOURS: i64 = 6;

/// The OOH nights produced by a single shift.
///
/// Computed eagerly and never mutated. Two periods built from the same
/// interval are always equal.
///
/// # Example
///
/// ```
/// use ooh_compensation::calculation::OohPeriod;
/// use chrono::DateTime;
///
/// // Thursday 10:00 to Monday 10:00, London summer time
/// let since = DateTime::parse_from_rfc3339("2024-08-01T10:00:00+01:00").unwrap();
/// let until = DateTime::parse_from_rfc3339("2024-08-05T10:00:00+01:00").unwrap();
///
/// let period = OohPeriod::classify(since, until, "Europe/London").unwrap();
/// assert_eq!(period.weekday_count(), 1); // Thursday
/// assert_eq!(period.weekend_count(), 3); // Friday, Saturday, Sunday
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OohPeriod {
    weekday_count: u32,
    weekend_count: u32,
    days: Vec<OohDay>,
}

impl OohPeriod {
    /// Classifies a shift given as raw instants and a zone identifier.
    ///
    /// # Errors
    ///
    /// - [`CompensationError::Timezone`](crate::error::CompensationError::Timezone)
    ///   for an unknown zone
    /// - [`CompensationError::InvalidRange`](crate::error::CompensationError::InvalidRange)
    ///   if `until` precedes `since`
    pub fn classify<S, U>(since: DateTime<S>, until: DateTime<U>, timezone: &str) -> CompensationResult<Self>
    where
        S: TimeZone,
        U: TimeZone,
    {
        let interval = ShiftInterval::new(since, until, timezone)?;
        Ok(Self::from_interval(&interval))
    }

    /// Classifies an already validated shift interval.
    pub fn from_interval(interval: &ShiftInterval) -> Self {
        let tz = interval.timezone();
        let until = interval.local_until();
        let mut current = interval.local_since();
        let mut days = Vec::new();

        while current < until {
            if is_ooh_day(&current, &until, tz) {
                days.push(OohDay::new(current.date_naive()));
            }

            match next_calendar_day(&current, tz) {
                Some(next) => current = next,
                None => break,
            }
        }

        let weekend_count = days
            .iter()
            .filter(|day| day.bucket == DayBucket::Weekend)
            .count() as u32;
        let weekday_count = days.len() as u32 - weekend_count;

        Self {
            weekday_count,
            weekend_count,
            days,
        }
    }

    /// Number of qualifying Monday to Thursday nights.
    pub fn weekday_count(&self) -> u32 {
        self.weekday_count
    }

    /// Number of qualifying Friday to Sunday nights.
    pub fn weekend_count(&self) -> u32 {
        self.weekend_count
    }

    /// `(weekday_count, weekend_count)`.
    pub fn counts(&self) -> (u32, u32) {
        (self.weekday_count, self.weekend_count)
    }

    /// All qualifying nights.
    pub fn total_count(&self) -> u32 {
        self.weekday_count + self.weekend_count
    }

    /// The qualifying local dates in chronological order.
    pub fn days(&self) -> &[OohDay] {
        &self.days
    }
}

/// Evaluates the OOH predicate for one step of the walk.
fn is_ooh_day(current: &DateTime<Tz>, until: &DateTime<Tz>, tz: Tz) -> bool {
    if current.date_naive() == until.date_naive() {
        return false;
    }

    let end_of_business = resolve_local(tz, current.date_naive().and_time(END_OF_BUSINESS), current);
    if end_of_business >= *until {
        return false;
    }

    until.signed_duration_since(*current) >= TimeDelta::hours(MIN_OOH_HOURS)
}

/// Moves to the same local wall time on the next calendar date.
fn next_calendar_day(current: &DateTime<Tz>, tz: Tz) -> Option<DateTime<Tz>> {
    let naive = current.naive_local().checked_add_days(Days::new(1))?;
    Some(resolve_local(tz, naive, current))
}

/// Maps a local wall time to an instant in `tz`.
///
/// A repeated wall time (clocks going back) keeps the reference instant's
/// offset when it can, otherwise takes the earlier instant. A skipped wall
/// time (clocks going forward) is read with the reference offset, which lands
/// just after the gap.
fn resolve_local(tz: Tz, naive: NaiveDateTime, reference: &DateTime<Tz>) -> DateTime<Tz> {
    let reference_offset = reference.offset().fix();

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(resolved) => resolved,
        LocalResult::Ambiguous(earliest, latest) => {
            if latest.offset().fix() == reference_offset {
                latest
            } else {
                earliest
            }
        }
        LocalResult::None => {
            let utc = naive - TimeDelta::seconds(i64::from(reference_offset.local_minus_utc()));
            Utc.from_utc_datetime(&utc).with_timezone(&tz)
        }
    }
}

/// Classifies a shift and returns `(weekday_count, weekend_count)`.
///
/// # Example
///
/// ```
/// use ooh_compensation::calculation::classify;
/// use chrono::DateTime;
///
/// // Friday 18:00 to Monday 09:00
/// let since = DateTime::parse_from_rfc3339("2024-01-12T18:00:00-05:00").unwrap();
/// let until = DateTime::parse_from_rfc3339("2024-01-15T09:00:00-05:00").unwrap();
///
/// assert_eq!(classify(since, until, "America/New_York").unwrap(), (0, 3));
/// ```
pub fn classify<S, U>(since: DateTime<S>, until: DateTime<U>, timezone: &str) -> CompensationResult<(u32, u32)>
where
    S: TimeZone,
    U: TimeZone,
{
    OohPeriod::classify(since, until, timezone).map(|period| period.counts())
}
