//! Configuration types for OOH compensation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Weekday;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    DEFAULT_WEEKDAY_RATE, DEFAULT_WEEKEND_RATE, PerWeekdayRates, RateStrategy, TwoBucketRates,
};
use crate::error::{CompensationError, CompensationResult};
use crate::models::parse_timezone;

fn default_currency() -> String {
    "GBP".to_string()
}

fn default_weekday_rate() -> Decimal {
    DEFAULT_WEEKDAY_RATE
}

fn default_weekend_rate() -> Decimal {
    DEFAULT_WEEKEND_RATE
}

/// A full rate table, one entry per day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayRatesConfig {
    /// Rate for a night starting on Monday.
    pub monday: Decimal,
    /// Rate for a night starting on Tuesday.
    pub tuesday: Decimal,
    /// Rate for a night starting on Wednesday.
    pub wednesday: Decimal,
    /// Rate for a night starting on Thursday.
    pub thursday: Decimal,
    /// Rate for a night starting on Friday.
    pub friday: Decimal,
    /// Rate for a night starting on Saturday.
    pub saturday: Decimal,
    /// Rate for a night starting on Sunday.
    pub sunday: Decimal,
}

impl WeekdayRatesConfig {
    /// The table keyed by [`Weekday`].
    pub fn to_table(&self) -> HashMap<Weekday, Decimal> {
        HashMap::from([
            (Weekday::Mon, self.monday),
            (Weekday::Tue, self.tuesday),
            (Weekday::Wed, self.wednesday),
            (Weekday::Thu, self.thursday),
            (Weekday::Fri, self.friday),
            (Weekday::Sat, self.saturday),
            (Weekday::Sun, self.sunday),
        ])
    }
}

/// Rates section of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatesConfig {
    /// Rate per weekday OOH night (Monday to Thursday).
    #[serde(default = "default_weekday_rate")]
    pub weekday: Decimal,
    /// Rate per weekend OOH night (Friday to Sunday).
    #[serde(default = "default_weekend_rate")]
    pub weekend: Decimal,
    /// Optional per-day table. Takes precedence over the two buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_weekday: Option<WeekdayRatesConfig>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            weekday: DEFAULT_WEEKDAY_RATE,
            weekend: DEFAULT_WEEKEND_RATE,
            per_weekday: None,
        }
    }
}

/// The complete compensation configuration.
///
/// # Example
///
/// ```
/// use ooh_compensation::config::CompensationConfig;
/// use rust_decimal::Decimal;
///
/// let config = CompensationConfig::default();
/// assert_eq!(config.currency, "GBP");
/// assert_eq!(config.rates.weekend, Decimal::from(75));
/// assert!(config.timezone.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationConfig {
    /// Currency label attached to every amount.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Default IANA zone for shifts that do not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Rate configuration.
    #[serde(default)]
    pub rates: RatesConfig,
}

impl Default for CompensationConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            timezone: None,
            rates: RatesConfig::default(),
        }
    }
}

impl CompensationConfig {
    /// Checks every field that can be checked without a shift.
    ///
    /// # Errors
    ///
    /// - [`CompensationError::Validation`] for an empty currency or a
    ///   non-positive rate
    /// - [`CompensationError::Timezone`] for an unknown default zone
    pub fn validate(&self) -> CompensationResult<()> {
        if self.currency.trim().is_empty() {
            return Err(CompensationError::validation("Currency must not be empty"));
        }
        self.default_timezone()?;
        self.rate_strategy()?;
        Ok(())
    }

    /// The parsed default zone, if one is configured.
    pub fn default_timezone(&self) -> CompensationResult<Option<Tz>> {
        self.timezone.as_deref().map(parse_timezone).transpose()
    }

    /// Builds the configured rate strategy.
    ///
    /// A per-weekday table wins over the two-bucket rates when present.
    pub fn rate_strategy(&self) -> CompensationResult<Arc<dyn RateStrategy>> {
        match &self.rates.per_weekday {
            Some(table) => Ok(Arc::new(PerWeekdayRates::new(&table.to_table())?)),
            None => Ok(Arc::new(TwoBucketRates::new(
                self.rates.weekday,
                self.rates.weekend,
            )?)),
        }
    }
}
