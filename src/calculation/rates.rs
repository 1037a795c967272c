//! Rate strategies for pricing OOH nights.
//!
//! Two pricing models are supported behind the [`RateStrategy`] trait:
//!
//! - [`TwoBucketRates`]: one rate for weekday nights, one for weekend nights.
//! - [`PerWeekdayRates`]: one rate for each ISO weekday.

use std::collections::HashMap;

use chrono::Weekday;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{CompensationError, CompensationResult};

use super::day_bucket::{DayBucket, get_day_bucket};
use super::ooh_period::OohPeriod;

/// Default rate for a Monday to Thursday OOH night.
pub const DEFAULT_WEEKDAY_RATE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Default rate for a Friday to Sunday OOH night.
pub const DEFAULT_WEEKEND_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// ISO weekdays, Monday first.
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Qualifying OOH nights summed across one or more periods.
///
/// # Example
///
/// ```
/// use ooh_compensation::calculation::{OohPeriod, OohTally};
/// use chrono::{DateTime, Weekday};
///
/// let since = DateTime::parse_from_rfc3339("2024-08-01T10:00:00+01:00").unwrap();
/// let until = DateTime::parse_from_rfc3339("2024-08-05T10:00:00+01:00").unwrap();
/// let period = OohPeriod::classify(since, until, "Europe/London").unwrap();
///
/// let tally = OohTally::from_periods([&period]);
/// assert_eq!(tally.weekday_days, 1);
/// assert_eq!(tally.weekend_days, 3);
/// assert_eq!(tally.days_on(Weekday::Sat), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OohTally {
    /// Monday to Thursday nights.
    pub weekday_days: u32,
    /// Friday to Sunday nights.
    pub weekend_days: u32,
    /// Nights per ISO weekday, Monday first.
    pub per_weekday: [u32; 7],
}

impl OohTally {
    /// Sums the nights of every period.
    pub fn from_periods<'a, I>(periods: I) -> Self
    where
        I: IntoIterator<Item = &'a OohPeriod>,
    {
        let mut tally = Self::default();
        for period in periods {
            tally.add(period);
        }
        tally
    }

    /// Adds one period's nights to the tally.
    pub fn add(&mut self, period: &OohPeriod) {
        self.weekday_days += period.weekday_count();
        self.weekend_days += period.weekend_count();
        for day in period.days() {
            self.per_weekday[day.weekday.num_days_from_monday() as usize] += 1;
        }
    }

    /// Nights that fell on `weekday`.
    pub fn days_on(&self, weekday: Weekday) -> u32 {
        self.per_weekday[weekday.num_days_from_monday() as usize]
    }

    /// All qualifying nights.
    pub fn total_days(&self) -> u32 {
        self.weekday_days + self.weekend_days
    }
}

/// A pricing model for OOH nights.
///
/// Implementations hold only validated, positive rates and are immutable,
/// so a single strategy can be shared across threads.
pub trait RateStrategy: std::fmt::Debug + Send + Sync {
    /// Prices a tally of qualifying nights.
    fn price(&self, tally: &OohTally) -> Decimal;

    /// The rate reported for weekday nights in compensation records.
    fn weekday_rate(&self) -> Decimal;

    /// The rate reported for weekend nights in compensation records.
    fn weekend_rate(&self) -> Decimal;
}

fn validate_rate(name: &str, rate: Decimal) -> CompensationResult<Decimal> {
    if rate <= Decimal::ZERO {
        return Err(CompensationError::validation(format!(
            "{} rate must be a positive number, got {}",
            name, rate
        )));
    }
    Ok(rate)
}

fn rate_from_f64(name: &str, rate: f64) -> CompensationResult<Decimal> {
    if !rate.is_finite() {
        return Err(CompensationError::validation(format!(
            "{} rate must be a positive number, got {}",
            name, rate
        )));
    }

    let decimal = Decimal::from_f64(rate).ok_or_else(|| {
        CompensationError::validation(format!("{} rate {} is out of range", name, rate))
    })?;
    validate_rate(name, decimal)
}

/// The two-bucket pricing model: `weekday_days * weekday + weekend_days * weekend`.
///
/// # Example
///
/// ```
/// use ooh_compensation::calculation::{OohTally, RateStrategy, TwoBucketRates};
/// use rust_decimal::Decimal;
///
/// let rates = TwoBucketRates::new(Decimal::from(50), Decimal::from(75)).unwrap();
/// let tally = OohTally { weekday_days: 1, weekend_days: 3, ..Default::default() };
///
/// assert_eq!(rates.price(&tally), Decimal::from(275));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TwoBucketRates {
    weekday: Decimal,
    weekend: Decimal,
}

impl TwoBucketRates {
    /// Builds the model from two positive rates.
    ///
    /// # Errors
    ///
    /// [`CompensationError::Validation`] if either rate is zero or negative.
    pub fn new(weekday: Decimal, weekend: Decimal) -> CompensationResult<Self> {
        Ok(Self {
            weekday: validate_rate("Weekday", weekday)?,
            weekend: validate_rate("Weekend", weekend)?,
        })
    }

    /// Builds the model from floating point rates, rejecting NaN and infinities.
    ///
    /// # Example
    ///
    /// ```
    /// use ooh_compensation::calculation::TwoBucketRates;
    ///
    /// assert!(TwoBucketRates::try_from_f64(50.0, 75.5).is_ok());
    /// assert!(TwoBucketRates::try_from_f64(f64::NAN, 75.0).is_err());
    /// assert!(TwoBucketRates::try_from_f64(50.0, -1.0).is_err());
    /// ```
    pub fn try_from_f64(weekday: f64, weekend: f64) -> CompensationResult<Self> {
        Ok(Self {
            weekday: rate_from_f64("Weekday", weekday)?,
            weekend: rate_from_f64("Weekend", weekend)?,
        })
    }
}

impl Default for TwoBucketRates {
    fn default() -> Self {
        Self {
            weekday: DEFAULT_WEEKDAY_RATE,
            weekend: DEFAULT_WEEKEND_RATE,
        }
    }
}

impl RateStrategy for TwoBucketRates {
    fn price(&self, tally: &OohTally) -> Decimal {
        Decimal::from(tally.weekday_days) * self.weekday
            + Decimal::from(tally.weekend_days) * self.weekend
    }

    fn weekday_rate(&self) -> Decimal {
        self.weekday
    }

    fn weekend_rate(&self) -> Decimal {
        self.weekend
    }
}

/// A rate table with one entry per ISO weekday.
///
/// Each qualifying night is priced at the rate of the weekday it started on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerWeekdayRates {
    rates: [Decimal; 7],
}

impl PerWeekdayRates {
    /// Builds the table from a complete weekday map.
    ///
    /// # Errors
    ///
    /// [`CompensationError::Validation`] if a weekday is missing or any rate
    /// is zero or negative.
    ///
    /// # Example
    ///
    /// ```
    /// use ooh_compensation::calculation::{PerWeekdayRates, RateStrategy};
    /// use chrono::Weekday;
    /// use rust_decimal::Decimal;
    /// use std::collections::HashMap;
    ///
    /// let mut table = HashMap::new();
    /// for (weekday, rate) in [
    ///     (Weekday::Mon, 50), (Weekday::Tue, 50), (Weekday::Wed, 50), (Weekday::Thu, 50),
    ///     (Weekday::Fri, 75), (Weekday::Sat, 80), (Weekday::Sun, 80),
    /// ] {
    ///     table.insert(weekday, Decimal::from(rate));
    /// }
    ///
    /// let rates = PerWeekdayRates::new(&table).unwrap();
    /// assert_eq!(rates.rate_for(Weekday::Sat), Decimal::from(80));
    /// ```
    pub fn new(table: &HashMap<Weekday, Decimal>) -> CompensationResult<Self> {
        let mut rates = [Decimal::ZERO; 7];
        for (slot, weekday) in rates.iter_mut().zip(WEEK) {
            let rate = table.get(&weekday).copied().ok_or_else(|| {
                CompensationError::validation(format!("No rate configured for {}", weekday))
            })?;
            *slot = validate_rate(&weekday.to_string(), rate)?;
        }
        Ok(Self { rates })
    }

    /// Builds the table from the two-bucket model, giving every weekday its bucket's rate.
    pub fn from_buckets(buckets: &TwoBucketRates) -> Self {
        let mut rates = [Decimal::ZERO; 7];
        for (slot, weekday) in rates.iter_mut().zip(WEEK) {
            *slot = match get_day_bucket(weekday) {
                DayBucket::Weekday => buckets.weekday,
                DayBucket::Weekend => buckets.weekend,
            };
        }
        Self { rates }
    }

    /// The rate for one weekday.
    pub fn rate_for(&self, weekday: Weekday) -> Decimal {
        self.rates[weekday.num_days_from_monday() as usize]
    }
}

impl RateStrategy for PerWeekdayRates {
    fn price(&self, tally: &OohTally) -> Decimal {
        WEEK.iter()
            .map(|weekday| Decimal::from(tally.days_on(*weekday)) * self.rate_for(*weekday))
            .sum()
    }

    fn weekday_rate(&self) -> Decimal {
        self.rate_for(Weekday::Mon)
    }

    fn weekend_rate(&self) -> Decimal {
        self.rate_for(Weekday::Fri)
    }
}
