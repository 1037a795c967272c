//! Per-user compensation outputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OnCallUser;

/// The priced result for one user.
///
/// Purely derived from an [`OnCallUser`] and the calculator's rates.
///
/// # Example
///
/// ```
/// use ooh_compensation::models::CompensationRecord;
/// use rust_decimal::Decimal;
///
/// let record = CompensationRecord {
///     user_id: "PABC123".to_string(),
///     user_name: "Ada Lovelace".to_string(),
///     weekday_days: 1,
///     weekend_days: 3,
///     weekday_rate: Decimal::from(50),
///     weekend_rate: Decimal::from(75),
///     total_amount: Decimal::from(275),
/// };
/// assert_eq!(record.total_days(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationRecord {
    /// Identifier of the user.
    pub user_id: String,
    /// Display name of the user.
    pub user_name: String,
    /// Weekday OOH nights across all of the user's periods.
    pub weekday_days: u32,
    /// Weekend OOH nights across all of the user's periods.
    pub weekend_days: u32,
    /// Rate applied to weekday nights.
    pub weekday_rate: Decimal,
    /// Rate applied to weekend nights.
    pub weekend_rate: Decimal,
    /// Total compensation.
    pub total_amount: Decimal,
}

impl CompensationRecord {
    /// All OOH nights in the record.
    pub fn total_days(&self) -> u32 {
        self.weekday_days + self.weekend_days
    }
}

/// A user paired with the amount owed, as handed to report sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditableRecord {
    /// The user, including every period and its classification.
    pub user: OnCallUser,
    /// Total compensation.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_record() -> CompensationRecord {
        CompensationRecord {
            user_id: "PABC123".to_string(),
            user_name: "Ada Lovelace".to_string(),
            weekday_days: 1,
            weekend_days: 3,
            weekday_rate: dec("50"),
            weekend_rate: dec("75"),
            total_amount: dec("275"),
        }
    }

    #[test]
    fn test_total_days() {
        assert_eq!(sample_record().total_days(), 4);
    }

    #[test]
    fn test_record_serialization() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert!(json.contains("\"user_id\":\"PABC123\""));
        assert!(json.contains("\"weekend_days\":3"));
        assert!(json.contains("\"total_amount\":\"275\""));
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "user_id": "PXYZ789",
            "user_name": "Grace Hopper",
            "weekday_days": 2,
            "weekend_days": 0,
            "weekday_rate": "42.50",
            "weekend_rate": "63.75",
            "total_amount": "85.00"
        }"#;

        let record: CompensationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.user_name, "Grace Hopper");
        assert_eq!(record.weekday_rate, dec("42.50"));
        assert_eq!(record.total_amount, dec("85.00"));
    }

    #[test]
    fn test_auditable_record_serializes_user_and_amount() {
        let record = AuditableRecord {
            user: OnCallUser::new("PABC123", "Ada Lovelace"),
            amount: dec("0"),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["user"]["name"], "Ada Lovelace");
        assert_eq!(json["amount"], "0");
    }
}
