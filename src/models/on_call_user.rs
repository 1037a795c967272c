//! On-call user model and its periods.
//!
//! An [`OnCallUser`] owns an append-only list of [`OnCallPeriod`]s. Each
//! period pairs the shift interval with its OOH classification, computed
//! once when the period is built.

use chrono::{DateTime, TimeZone};
use indexmap::IndexMap;
use serde::Serialize;

use crate::calculation::{OohPeriod, OohTally};
use crate::error::CompensationResult;

use super::shift::{ShiftInterval, parse_timezone};

/// A shift together with the OOH nights it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnCallPeriod {
    interval: ShiftInterval,
    ooh: OohPeriod,
}

impl OnCallPeriod {
    /// Classifies `interval` and keeps both halves together.
    pub fn new(interval: ShiftInterval) -> Self {
        let ooh = OohPeriod::from_interval(&interval);
        Self { interval, ooh }
    }

    /// Builds a period from raw instants and a zone identifier.
    ///
    /// # Errors
    ///
    /// Timezone and range errors from [`ShiftInterval::new`].
    pub fn from_instants<S, U>(since: DateTime<S>, until: DateTime<U>, timezone: &str) -> CompensationResult<Self>
    where
        S: TimeZone,
        U: TimeZone,
    {
        ShiftInterval::new(since, until, timezone).map(Self::new)
    }

    /// The shift interval.
    pub fn interval(&self) -> &ShiftInterval {
        &self.interval
    }

    /// The OOH classification of the shift.
    pub fn ooh(&self) -> &OohPeriod {
        &self.ooh
    }
}

/// A person on an on-call rota and the shifts they covered.
///
/// # Example
///
/// ```
/// use ooh_compensation::models::{OnCallPeriod, OnCallUser};
/// use chrono::DateTime;
///
/// let mut user = OnCallUser::new("PABC123", "Ada Lovelace");
/// user.add_period(
///     OnCallPeriod::from_instants(
///         DateTime::parse_from_rfc3339("2024-08-01T10:00:00+01:00").unwrap(),
///         DateTime::parse_from_rfc3339("2024-08-05T10:00:00+01:00").unwrap(),
///         "Europe/London",
///     )
///     .unwrap(),
/// );
///
/// assert_eq!(user.total_weekday_ooh_days(), 1);
/// assert_eq!(user.total_weekend_ooh_days(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnCallUser {
    /// Identifier from the scheduling source.
    pub id: String,
    /// Display name.
    pub name: String,
    periods: Vec<OnCallPeriod>,
}

impl OnCallUser {
    /// Creates a user with no periods.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            periods: Vec::new(),
        }
    }

    /// Appends a period.
    pub fn add_period(&mut self, period: OnCallPeriod) {
        self.periods.push(period);
    }

    /// The user's periods in the order they were added.
    pub fn periods(&self) -> &[OnCallPeriod] {
        &self.periods
    }

    /// Weekday OOH nights across all periods.
    pub fn total_weekday_ooh_days(&self) -> u32 {
        self.periods.iter().map(|p| p.ooh.weekday_count()).sum()
    }

    /// Weekend OOH nights across all periods.
    pub fn total_weekend_ooh_days(&self) -> u32 {
        self.periods.iter().map(|p| p.ooh.weekend_count()).sum()
    }

    /// Per-bucket and per-weekday totals across all periods.
    pub fn ooh_tally(&self) -> OohTally {
        OohTally::from_periods(self.periods.iter().map(|p| &p.ooh))
    }

    /// Groups schedule assignments into users, in the order each assignee is
    /// first seen.
    ///
    /// Each assignment is `(start, end, assignee_id, assignee_name)`; all of
    /// them are evaluated in `timezone`. The first name seen for an id wins.
    ///
    /// # Errors
    ///
    /// The first timezone or range error encountered.
    pub fn from_assignments<Z, I, S>(assignments: I, timezone: &str) -> CompensationResult<Vec<Self>>
    where
        Z: TimeZone,
        I: IntoIterator<Item = (DateTime<Z>, DateTime<Z>, S, S)>,
        S: Into<String>,
    {
        let tz = parse_timezone(timezone)?;
        let mut users: IndexMap<String, OnCallUser> = IndexMap::new();

        for (start, end, id, name) in assignments {
            let interval = ShiftInterval::with_tz(
                start.with_timezone(&chrono::Utc),
                end.with_timezone(&chrono::Utc),
                tz,
            )?;
            let id = id.into();
            users
                .entry(id.clone())
                .or_insert_with(|| OnCallUser::new(id, name))
                .add_period(OnCallPeriod::new(interval));
        }

        Ok(users.into_values().collect())
    }
}
