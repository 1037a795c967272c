//! Compensation calculator.
//!
//! Sums each user's OOH nights across all of their periods and prices the
//! totals with a [`RateStrategy`]. Every method is a pure function of its
//! inputs; a calculator can be shared between threads.

use std::sync::Arc;

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::error::{CompensationError, CompensationResult};
use crate::models::{AuditableRecord, CompensationRecord, OnCallUser};

use super::rates::{RateStrategy, TwoBucketRates};

/// Prices on-call users' OOH nights.
///
/// # Example
///
/// ```
/// use ooh_compensation::calculation::CompensationCalculator;
/// use ooh_compensation::models::{OnCallPeriod, OnCallUser};
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
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
/// let calculator = CompensationCalculator::with_rates(Decimal::from(50), Decimal::from(75)).unwrap();
/// assert_eq!(calculator.calculate(&user).unwrap(), Decimal::from(275));
/// ```
#[derive(Debug, Clone)]
pub struct CompensationCalculator {
    rates: Arc<dyn RateStrategy>,
}

impl Default for CompensationCalculator {
    fn default() -> Self {
        Self::with_strategy(TwoBucketRates::default())
    }
}

impl CompensationCalculator {
    /// A calculator using the default weekday and weekend rates.
    pub fn new() -> Self {
        Self::default()
    }

    /// A calculator using the two-bucket model with the given rates.
    ///
    /// # Errors
    ///
    /// [`CompensationError::Validation`] if either rate is not positive.
    pub fn with_rates(weekday: Decimal, weekend: Decimal) -> CompensationResult<Self> {
        Ok(Self::with_strategy(TwoBucketRates::new(weekday, weekend)?))
    }

    /// A calculator using any rate strategy.
    pub fn with_strategy<R: RateStrategy + 'static>(strategy: R) -> Self {
        Self {
            rates: Arc::new(strategy),
        }
    }

    /// A calculator using an already shared rate strategy.
    pub fn from_shared(rates: Arc<dyn RateStrategy>) -> Self {
        Self { rates }
    }

    /// The rate strategy in use.
    pub fn rates(&self) -> &dyn RateStrategy {
        self.rates.as_ref()
    }

    /// Total compensation for one user.
    ///
    /// # Errors
    ///
    /// [`CompensationError::Validation`] if the user has no id, no name or
    /// no periods.
    pub fn calculate(&self, user: &OnCallUser) -> CompensationResult<Decimal> {
        validate_user(user)?;
        Ok(self.price(user))
    }

    /// Total compensation per user id, in input order.
    ///
    /// Every user is validated before anything is priced; the first invalid
    /// user aborts the batch.
    pub fn calculate_many(&self, users: &[OnCallUser]) -> CompensationResult<IndexMap<String, Decimal>> {
        validate_users(users)?;
        Ok(users
            .iter()
            .map(|user| (user.id.clone(), self.price(user)))
            .collect())
    }

    /// Each user with the amount owed, keyed by user id in input order.
    ///
    /// Same validation as [`calculate_many`](Self::calculate_many).
    pub fn auditable_records(
        &self,
        users: &[OnCallUser],
    ) -> CompensationResult<IndexMap<String, AuditableRecord>> {
        validate_users(users)?;
        Ok(users
            .iter()
            .map(|user| {
                let record = AuditableRecord {
                    user: user.clone(),
                    amount: self.price(user),
                };
                (user.id.clone(), record)
            })
            .collect())
    }

    /// The full priced breakdown for one user.
    pub fn compensation_record(&self, user: &OnCallUser) -> CompensationResult<CompensationRecord> {
        validate_user(user)?;
        Ok(self.record(user))
    }

    /// Priced breakdowns for every user, in input order.
    pub fn compensation_records(&self, users: &[OnCallUser]) -> CompensationResult<Vec<CompensationRecord>> {
        validate_users(users)?;
        Ok(users.iter().map(|user| self.record(user)).collect())
    }

    fn price(&self, user: &OnCallUser) -> Decimal {
        self.rates.price(&user.ooh_tally())
    }

    fn record(&self, user: &OnCallUser) -> CompensationRecord {
        let tally = user.ooh_tally();
        CompensationRecord {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            weekday_days: tally.weekday_days,
            weekend_days: tally.weekend_days,
            weekday_rate: self.rates.weekday_rate(),
            weekend_rate: self.rates.weekend_rate(),
            total_amount: self.rates.price(&tally),
        }
    }
}

fn validate_users(users: &[OnCallUser]) -> CompensationResult<()> {
    users.iter().try_for_each(validate_user)
}

fn validate_user(user: &OnCallUser) -> CompensationResult<()> {
    let id = user.id.trim();
    let name = user.name.trim();

    let message = match (id.is_empty(), name.is_empty()) {
        (true, true) => "User must have an id and a name".to_string(),
        (true, false) => format!("User '{}' has no id", name),
        (false, true) => format!("User '{}' has no name", id),
        (false, false) if user.periods().is_empty() => {
            format!("User '{}' ({}) has no on-call periods", id, name)
        }
        (false, false) => return Ok(()),
    };

    Err(CompensationError::Validation { message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::PerWeekdayRates;
    use crate::models::OnCallPeriod;
    use chrono::DateTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn period(since: &str, until: &str, timezone: &str) -> OnCallPeriod {
        OnCallPeriod::from_instants(
            DateTime::parse_from_rfc3339(since).unwrap(),
            DateTime::parse_from_rfc3339(until).unwrap(),
            timezone,
        )
        .unwrap()
    }

    fn user_with_periods(id: &str, name: &str, periods: Vec<OnCallPeriod>) -> OnCallUser {
        let mut user = OnCallUser::new(id, name);
        for p in periods {
            user.add_period(p);
        }
        user
    }

    /// Thursday 10:00 to Monday 10:00: 1 weekday, 3 weekend.
    fn thursday_to_monday_user(id: &str) -> OnCallUser {
        user_with_periods(
            id,
            "Ada Lovelace",
            vec![period(
                "2024-08-01T10:00:00+01:00",
                "2024-08-05T10:00:00+01:00",
                "Europe/London",
            )],
        )
    }

    fn calculator() -> CompensationCalculator {
        CompensationCalculator::with_rates(dec("50"), dec("75")).unwrap()
    }

    // ==========================================================================
    // CC-001: end-to-end pricing example
    // ==========================================================================
    #[test]
    fn test_cc_001_thursday_to_monday_pays_275() {
        let user = thursday_to_monday_user("PABC123");

        assert_eq!(user.total_weekday_ooh_days(), 1);
        assert_eq!(user.total_weekend_ooh_days(), 3);
        assert_eq!(calculator().calculate(&user).unwrap(), dec("275"));
    }

    // ==========================================================================
    // CC-002: zero periods is a validation error
    // ==========================================================================
    #[test]
    fn test_cc_002_user_without_periods_fails() {
        let user = OnCallUser::new("PABC123", "Ada Lovelace");

        match calculator().calculate(&user) {
            Err(CompensationError::Validation { message }) => {
                assert_eq!(message, "User 'PABC123' (Ada Lovelace) has no on-call periods");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_id_and_name_are_reported() {
        let p = || period("2024-08-01T10:00:00+01:00", "2024-08-05T10:00:00+01:00", "Europe/London");

        let no_id = user_with_periods("", "Ada Lovelace", vec![p()]);
        let no_name = user_with_periods("PABC123", " ", vec![p()]);
        let neither = user_with_periods("", "", vec![p()]);

        let message = |user: &OnCallUser| match calculator().calculate(user) {
            Err(CompensationError::Validation { message }) => message,
            other => panic!("Expected Validation error, got {:?}", other),
        };

        assert_eq!(message(&no_id), "User 'Ada Lovelace' has no id");
        assert_eq!(message(&no_name), "User 'PABC123' has no name");
        assert_eq!(message(&neither), "User must have an id and a name");
    }

    #[test]
    fn test_default_rates_price_weekend_higher() {
        let user = thursday_to_monday_user("PABC123");
        let amount = CompensationCalculator::new().calculate(&user).unwrap();

        assert_eq!(amount, dec("275"));
    }

    #[test]
    fn test_totals_are_summed_across_periods_before_pricing() {
        let user = user_with_periods(
            "PABC123",
            "Ada Lovelace",
            vec![
                period("2024-08-01T10:00:00+01:00", "2024-08-05T10:00:00+01:00", "Europe/London"),
                // Monday 18:00 to Tuesday 08:00 New York time: 1 weekday
                period("2024-08-05T18:00:00-04:00", "2024-08-06T08:00:00-04:00", "America/New_York"),
                // Same-day shift: nothing
                period("2024-08-07T09:00:00+01:00", "2024-08-07T17:00:00+01:00", "Europe/London"),
            ],
        );

        // 2 * 50 + 3 * 75
        assert_eq!(calculator().calculate(&user).unwrap(), dec("325"));
    }

    #[test]
    fn test_user_with_only_non_qualifying_periods_is_paid_zero() {
        let user = user_with_periods(
            "PABC123",
            "Ada Lovelace",
            vec![period("2024-08-07T09:00:00+01:00", "2024-08-07T17:00:00+01:00", "Europe/London")],
        );

        assert_eq!(calculator().calculate(&user).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_invalid_rates_fail_at_construction() {
        assert!(CompensationCalculator::with_rates(dec("0"), dec("75")).is_err());
        assert!(CompensationCalculator::with_rates(dec("50"), dec("-1")).is_err());
    }

    // ==========================================================================
    // CC-003: batch results keep input order
    // ==========================================================================
    #[test]
    fn test_cc_003_calculate_many_keeps_input_order() {
        let users = vec![
            thursday_to_monday_user("PZED"),
            thursday_to_monday_user("PALPHA"),
            thursday_to_monday_user("PMID"),
        ];

        let amounts = calculator().calculate_many(&users).unwrap();
        let ids: Vec<&str> = amounts.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["PZED", "PALPHA", "PMID"]);
        assert!(amounts.values().all(|amount| *amount == dec("275")));
    }

    // ==========================================================================
    // CC-004: one invalid user aborts the batch
    // ==========================================================================
    #[test]
    fn test_cc_004_first_invalid_user_aborts_batch() {
        let users = vec![
            thursday_to_monday_user("PGOOD"),
            OnCallUser::new("PEMPTY", "Empty Rota"),
            OnCallUser::new("", "Nameless"),
        ];

        match calculator().calculate_many(&users) {
            Err(CompensationError::Validation { message }) => {
                assert!(message.contains("PEMPTY"), "{}", message);
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }

        assert!(calculator().auditable_records(&users).is_err());
        assert!(calculator().compensation_records(&users).is_err());
    }

    #[test]
    fn test_auditable_records_carry_user_and_amount() {
        let users = vec![thursday_to_monday_user("P1"), thursday_to_monday_user("P2")];

        let records = calculator().auditable_records(&users).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records["P1"];
        assert_eq!(first.user, users[0]);
        assert_eq!(first.amount, dec("275"));
        assert_eq!(records.get_index(1).unwrap().0, "P2");
    }

    #[test]
    fn test_empty_batch_is_empty() {
        let amounts = calculator().calculate_many(&[]).unwrap();
        assert!(amounts.is_empty());
    }

    #[test]
    fn test_compensation_record_breakdown() {
        let record = calculator()
            .compensation_record(&thursday_to_monday_user("PABC123"))
            .unwrap();

        assert_eq!(record.user_id, "PABC123");
        assert_eq!(record.user_name, "Ada Lovelace");
        assert_eq!(record.weekday_days, 1);
        assert_eq!(record.weekend_days, 3);
        assert_eq!(record.weekday_rate, dec("50"));
        assert_eq!(record.weekend_rate, dec("75"));
        assert_eq!(record.total_amount, dec("275"));
    }

    #[test]
    fn test_per_weekday_strategy() {
        let table = [
            (chrono::Weekday::Mon, "40"),
            (chrono::Weekday::Tue, "40"),
            (chrono::Weekday::Wed, "40"),
            (chrono::Weekday::Thu, "45"),
            (chrono::Weekday::Fri, "70"),
            (chrono::Weekday::Sat, "90"),
            (chrono::Weekday::Sun, "90"),
        ]
        .into_iter()
        .map(|(day, rate)| (day, dec(rate)))
        .collect();

        let calculator =
            CompensationCalculator::with_strategy(PerWeekdayRates::new(&table).unwrap());
        let amount = calculator.calculate(&thursday_to_monday_user("P1")).unwrap();

        // Thu 45 + Fri 70 + Sat 90 + Sun 90
        assert_eq!(amount, dec("295"));
    }

    #[test]
    fn test_calculator_is_shareable_across_threads() {
        let calculator = Arc::new(calculator());
        let user = Arc::new(thursday_to_monday_user("P1"));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let calculator = Arc::clone(&calculator);
                let user = Arc::clone(&user);
                std::thread::spawn(move || calculator.calculate(&user).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), dec("275"));
        }
    }
}
