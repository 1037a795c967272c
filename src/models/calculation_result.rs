//! Calculation result models for the OOH compensation engine.
//!
//! This module contains the [`CalculationResult`] type returned by the HTTP
//! layer and the audit trace structures that explain how each amount was
//! reached.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CompensationRecord;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The user the step belongs to.
    pub user_id: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs that are valid but probably not what the caller
/// intended, such as a shift that produced no OOH nights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use ooh_compensation::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a compensation calculation.
///
/// # Example
///
/// ```
/// use ooh_compensation::models::{AuditTrace, CalculationResult};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let result = CalculationResult {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     currency: "GBP".to_string(),
///     records: vec![],
///     total_amount: Decimal::ZERO,
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert!(result.records.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Currency label for every amount in the result.
    pub currency: String,
    /// One record per user, in request order.
    pub records: Vec<CompensationRecord>,
    /// Sum of all record totals.
    pub total_amount: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_record(user_id: &str, amount: &str) -> CompensationRecord {
        CompensationRecord {
            user_id: user_id.to_string(),
            user_name: format!("User {}", user_id),
            weekday_days: 1,
            weekend_days: 1,
            weekday_rate: dec("50"),
            weekend_rate: dec("75"),
            total_amount: dec(amount),
        }
    }

    fn sample_result(records: Vec<CompensationRecord>) -> CalculationResult {
        let total_amount = records.iter().map(|r| r.total_amount).sum();
        CalculationResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            currency: "GBP".to_string(),
            records,
            total_amount,
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 1000,
            },
        }
    }

    /// CR-001: total_amount equals sum of records
    #[test]
    fn test_total_equals_sum_of_records() {
        let result = sample_result(vec![
            sample_record("P1", "125"),
            sample_record("P2", "275"),
        ]);

        let sum: Decimal = result.records.iter().map(|r| r.total_amount).sum();
        assert_eq!(result.total_amount, sum);
        assert_eq!(result.total_amount, dec("400"));
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let result = sample_result(vec![sample_record("P1", "125")]);

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "ooh_classification".to_string(),
            rule_name: "OOH Night Classification".to_string(),
            user_id: "P1".to_string(),
            input: serde_json::json!({"timezone": "Europe/London"}),
            output: serde_json::json!({"weekday_days": 1, "weekend_days": 3}),
            reasoning: "4 qualifying nights".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"ooh_classification\""));
        assert!(json.contains("\"user_id\":\"P1\""));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "NO_OOH_NIGHTS".to_string(),
            message: "Shift produced no OOH nights".to_string(),
            severity: "low".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"NO_OOH_NIGHTS\""));
        assert!(json.contains("\"severity\":\"low\""));
    }
}
