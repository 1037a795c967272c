//! Shift interval model.
//!
//! This module defines the [`ShiftInterval`] struct, the validated
//! `(since, until, timezone)` triple that every OOH classification starts from.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{CompensationError, CompensationResult};

/// Parses an IANA timezone identifier.
///
/// Unknown identifiers fail with [`CompensationError::Timezone`]; there is no
/// fallback to UTC.
///
/// # Examples
///
/// ```
/// use ooh_compensation::models::parse_timezone;
///
/// assert_eq!(parse_timezone("Europe/London").unwrap(), chrono_tz::Europe::London);
/// assert!(parse_timezone("Europe/Atlantis").is_err());
/// ```
pub fn parse_timezone(timezone: &str) -> CompensationResult<Tz> {
    timezone
        .parse::<Tz>()
        .map_err(|_| CompensationError::Timezone {
            timezone: timezone.to_string(),
        })
}

/// An on-call shift between two absolute instants, evaluated in one IANA zone.
///
/// The interval is immutable once built and always satisfies `since <= until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftInterval {
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    timezone: Tz,
}

impl ShiftInterval {
    /// Builds a shift interval from two instants and a zone identifier.
    ///
    /// # Errors
    ///
    /// - [`CompensationError::Timezone`] if `timezone` is not an IANA zone
    /// - [`CompensationError::InvalidRange`] if `until` precedes `since`
    ///
    /// # Examples
    ///
    /// ```
    /// use ooh_compensation::models::ShiftInterval;
    /// use chrono::{DateTime, Utc};
    ///
    /// let since: DateTime<Utc> = "2024-08-01T09:00:00Z".parse().unwrap();
    /// let until: DateTime<Utc> = "2024-08-05T09:00:00Z".parse().unwrap();
    ///
    /// let interval = ShiftInterval::new(since, until, "Europe/London").unwrap();
    /// assert_eq!(interval.duration().num_days(), 4);
    ///
    /// assert!(ShiftInterval::new(until, since, "Europe/London").is_err());
    /// ```
    pub fn new<S, U>(since: DateTime<S>, until: DateTime<U>, timezone: &str) -> CompensationResult<Self>
    where
        S: chrono::TimeZone,
        U: chrono::TimeZone,
    {
        let timezone = parse_timezone(timezone)?;
        Self::with_tz(since.with_timezone(&Utc), until.with_timezone(&Utc), timezone)
    }

    /// Builds a shift interval with an already resolved zone.
    ///
    /// # Errors
    ///
    /// [`CompensationError::InvalidRange`] if `until` precedes `since`.
    pub fn with_tz(since: DateTime<Utc>, until: DateTime<Utc>, timezone: Tz) -> CompensationResult<Self> {
        if since > until {
            return Err(CompensationError::InvalidRange { since, until });
        }

        Ok(Self {
            since,
            until,
            timezone,
        })
    }

    /// The start of the shift.
    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }

    /// The end of the shift.
    pub fn until(&self) -> DateTime<Utc> {
        self.until
    }

    /// The zone the shift's local days are evaluated in.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The start of the shift in its own zone.
    pub fn local_since(&self) -> DateTime<Tz> {
        self.since.with_timezone(&self.timezone)
    }

    /// The end of the shift in its own zone.
    pub fn local_until(&self) -> DateTime<Tz> {
        self.until.with_timezone(&self.timezone)
    }

    /// Real elapsed time between the two instants.
    pub fn duration(&self) -> TimeDelta {
        self.until - self.since
    }
}
