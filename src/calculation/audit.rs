//! Audit trail construction for compensation calculations.
//!
//! Each user contributes one classification step per period followed by a
//! single pricing step. Periods that produced no OOH nights raise a low
//! severity warning.

use crate::models::{AuditStep, AuditWarning, CompensationRecord, OnCallPeriod, OnCallUser};

/// Rule identifier for per-period OOH classification steps.
pub const OOH_CLASSIFICATION_RULE: &str = "ooh_classification";

/// Rule identifier for per-user pricing steps.
pub const OOH_PRICING_RULE: &str = "ooh_pricing";

/// Warning code for periods that produced no OOH nights.
pub const NO_OOH_NIGHTS_WARNING: &str = "NO_OOH_NIGHTS";

/// The audit steps and warnings produced for one user.
#[derive(Debug, Clone)]
pub struct UserAudit {
    /// Classification steps in period order, then the pricing step.
    pub steps: Vec<AuditStep>,
    /// Warnings raised while classifying the user's periods.
    pub warnings: Vec<AuditWarning>,
}

impl UserAudit {
    /// The step number following the last step in this audit.
    pub fn next_step(&self, first_step: u32) -> u32 {
        first_step + self.steps.len() as u32
    }
}

/// Records how a single period was classified.
pub fn classification_step(user_id: &str, period: &OnCallPeriod, step_number: u32) -> AuditStep {
    let interval = period.interval();
    let ooh = period.ooh();

    let nights: Vec<String> = ooh
        .days()
        .iter()
        .map(|day| format!("{} ({}, {})", day.date, day.weekday, day.bucket))
        .collect();

    let reasoning = if nights.is_empty() {
        format!(
            "No qualifying nights between {} and {} in {}",
            interval.local_since(),
            interval.local_until(),
            interval.timezone().name()
        )
    } else {
        format!(
            "{} qualifying night(s) in {}: {}",
            nights.len(),
            interval.timezone().name(),
            nights.join(", ")
        )
    };

    AuditStep {
        step_number,
        rule_id: OOH_CLASSIFICATION_RULE.to_string(),
        rule_name: "OOH Night Classification".to_string(),
        user_id: user_id.to_string(),
        input: serde_json::json!({
            "since": interval.since().to_rfc3339(),
            "until": interval.until().to_rfc3339(),
            "timezone": interval.timezone().name(),
        }),
        output: serde_json::json!({
            "weekday_count": ooh.weekday_count(),
            "weekend_count": ooh.weekend_count(),
            "days": ooh.days(),
        }),
        reasoning,
    }
}

/// Records how a user's totals were priced.
pub fn pricing_step(record: &CompensationRecord, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: OOH_PRICING_RULE.to_string(),
        rule_name: "OOH Compensation".to_string(),
        user_id: record.user_id.clone(),
        input: serde_json::json!({
            "weekday_days": record.weekday_days,
            "weekend_days": record.weekend_days,
            "weekday_rate": record.weekday_rate.to_string(),
            "weekend_rate": record.weekend_rate.to_string(),
        }),
        output: serde_json::json!({
            "total_amount": record.total_amount.to_string(),
        }),
        reasoning: format!(
            "{} weekday night(s) x {} + {} weekend night(s) x {} = {}",
            record.weekday_days,
            record.weekday_rate,
            record.weekend_days,
            record.weekend_rate,
            record.total_amount
        ),
    }
}

/// Builds the full audit for one user, numbering steps from `first_step`.
///
/// `record` must be the priced record for `user`.
pub fn audit_user(user: &OnCallUser, record: &CompensationRecord, first_step: u32) -> UserAudit {
    let mut steps = Vec::with_capacity(user.periods().len() + 1);
    let mut warnings = Vec::new();
    let mut step_number = first_step;

    for (index, period) in user.periods().iter().enumerate() {
        steps.push(classification_step(&user.id, period, step_number));
        step_number += 1;

        if period.ooh().total_count() == 0 {
            warnings.push(AuditWarning {
                code: NO_OOH_NIGHTS_WARNING.to_string(),
                message: format!(
                    "Period {} for user '{}' produced no OOH nights",
                    index + 1,
                    user.id
                ),
                severity: "low".to_string(),
            });
        }
    }

    steps.push(pricing_step(record, step_number));

    UserAudit { steps, warnings }
}
