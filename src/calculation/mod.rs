//! Calculation logic for OOH on-call compensation.
//!
//! This module contains the night classification walk, the weekday/weekend
//! bucketing, the rate strategies, the compensation calculator and the
//! audit trail builders.

mod audit;
mod compensation;
mod day_bucket;
mod ooh_period;
mod rates;

pub use audit::{
    NO_OOH_NIGHTS_WARNING, OOH_CLASSIFICATION_RULE, OOH_PRICING_RULE, UserAudit, audit_user,
    classification_step, pricing_step,
};
pub use compensation::CompensationCalculator;
pub use day_bucket::{DayBucket, OohDay, get_day_bucket};
pub use ooh_period::{END_OF_BUSINESS, MIN_OOH_HOURS, OohPeriod, classify};
pub use rates::{
    DEFAULT_WEEKDAY_RATE, DEFAULT_WEEKEND_RATE, OohTally, PerWeekdayRates, RateStrategy,
    TwoBucketRates,
};
