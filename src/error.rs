//! Error types for the OOH compensation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while classifying shifts and
//! pricing on-call compensation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// The main error type for the OOH compensation engine.
///
/// Every fallible operation in the crate returns this error type. None of
/// the variants are recoverable at the point of detection; they are
/// surfaced to the immediate caller unchanged.
///
/// # Example
///
/// ```
/// use ooh_compensation::error::CompensationError;
///
/// let error = CompensationError::Timezone {
///     timezone: "Mars/Olympus_Mons".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown timezone: Mars/Olympus_Mons");
/// ```
#[derive(Debug, Error)]
pub enum CompensationError {
    /// A shift ends before it starts.
    #[error("Invalid shift range: end {until} precedes start {since}")]
    InvalidRange {
        /// The start of the rejected shift.
        since: DateTime<Utc>,
        /// The end of the rejected shift.
        until: DateTime<Utc>,
    },

    /// A user or rate failed validation.
    #[error("Validation failed: {message}")]
    Validation {
        /// A description of what failed validation.
        message: String,
    },

    /// The timezone identifier is not a known IANA zone.
    #[error("Unknown timezone: {timezone}")]
    Timezone {
        /// The identifier that could not be resolved.
        timezone: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl CompensationError {
    /// Shorthand for building a [`CompensationError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        CompensationError::Validation {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return CompensationError.
pub type CompensationResult<T> = Result<T, CompensationError>;
