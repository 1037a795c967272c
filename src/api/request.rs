//! Request types for the OOH compensation API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint
//! and their conversion into domain users.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{CompensationError, CompensationResult};
use crate::models::{OnCallPeriod, OnCallUser, ShiftInterval, parse_timezone};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The users to price, in the order results should be returned.
    pub users: Vec<UserRequest>,
    /// Zone for shifts that do not name one. Overrides the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// An on-call user in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    /// Identifier from the scheduling source.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The shifts the user covered.
    #[serde(default)]
    pub shifts: Vec<ShiftRequest>,
}

/// A single on-call shift in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// When the shift started (RFC 3339).
    pub start: DateTime<FixedOffset>,
    /// When the shift ended (RFC 3339).
    pub end: DateTime<FixedOffset>,
    /// IANA zone the shift is evaluated in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl CalculationRequest {
    /// Converts the request into domain users.
    ///
    /// A shift's zone is its own `timezone`, else the request's, else
    /// `configured_default`.
    ///
    /// # Errors
    ///
    /// - [`CompensationError::Timezone`] for an unknown zone
    /// - [`CompensationError::InvalidRange`] for a shift that ends before it starts
    /// - [`CompensationError::Validation`] for a shift with no resolvable zone
    pub fn into_users(self, configured_default: Option<Tz>) -> CompensationResult<Vec<OnCallUser>> {
        let request_default = self.timezone.as_deref().map(parse_timezone).transpose()?;
        let fallback = request_default.or(configured_default);

        self.users
            .into_iter()
            .map(|user| user.into_user(fallback))
            .collect()
    }
}

impl UserRequest {
    fn into_user(self, fallback: Option<Tz>) -> CompensationResult<OnCallUser> {
        let mut user = OnCallUser::new(self.id, self.name);

        for (index, shift) in self.shifts.into_iter().enumerate() {
            let timezone = match shift.timezone.as_deref() {
                Some(name) => parse_timezone(name)?,
                None => fallback.ok_or_else(|| {
                    CompensationError::validation(format!(
                        "Shift {} for user '{}' has no timezone and no default is configured",
                        index + 1,
                        user.id
                    ))
                })?,
            };

            let interval = ShiftInterval::with_tz(
                shift.start.with_timezone(&Utc),
                shift.end.with_timezone(&Utc),
                timezone,
            )?;
            user.add_period(OnCallPeriod::new(interval));
        }

        Ok(user)
    }
}
