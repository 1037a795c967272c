//! Day bucketing for OOH rate purposes.
//!
//! Qualifying OOH days are priced by bucket rather than by calendar fact:
//! Monday to Thursday are weekday nights, Friday to Sunday are weekend nights.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The compensation bucket a qualifying OOH day falls into.
///
/// # Example
///
/// ```
/// use ooh_compensation::calculation::DayBucket;
///
/// let bucket = DayBucket::Weekend;
/// assert_eq!(format!("{:?}", bucket), "Weekend");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBucket {
    /// Monday through Thursday.
    Weekday,
    /// Friday, Saturday and Sunday. Friday night is paid as a weekend night.
    Weekend,
}

impl std::fmt::Display for DayBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayBucket::Weekday => write!(f, "Weekday"),
            DayBucket::Weekend => write!(f, "Weekend"),
        }
    }
}

/// Returns the bucket for an ISO weekday.
///
/// # Example
///
/// ```
/// use ooh_compensation::calculation::{get_day_bucket, DayBucket};
/// use chrono::Weekday;
///
/// assert_eq!(get_day_bucket(Weekday::Thu), DayBucket::Weekday);
/// assert_eq!(get_day_bucket(Weekday::Fri), DayBucket::Weekend);
/// ```
pub fn get_day_bucket(weekday: Weekday) -> DayBucket {
    match weekday {
        Weekday::Fri | Weekday::Sat | Weekday::Sun => DayBucket::Weekend,
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => DayBucket::Weekday,
    }
}

/// A local calendar day on which a shift produced a qualifying OOH night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OohDay {
    /// The calendar date in the shift's timezone.
    pub date: NaiveDate,
    /// The ISO weekday of `date`.
    pub weekday: Weekday,
    /// The rate bucket for `weekday`.
    pub bucket: DayBucket,
}

impl OohDay {
    /// Builds the OOH record for a local date.
    pub fn new(date: NaiveDate) -> Self {
        let weekday = date.weekday();
        Self {
            date,
            weekday,
            bucket: get_day_bucket(weekday),
        }
    }
}
