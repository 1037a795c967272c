//! Core data models for the OOH compensation engine.
//!
//! This module contains the shift, user and result types shared by the
//! calculation core and the HTTP layer.

mod calculation_result;
mod compensation_record;
mod on_call_user;
mod shift;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use compensation_record::{AuditableRecord, CompensationRecord};
pub use on_call_user::{OnCallPeriod, OnCallUser};
pub use shift::{ShiftInterval, parse_timezone};
