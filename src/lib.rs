//! Out-of-hours (OOH) on-call compensation engine.
//!
//! This crate classifies on-call shifts into qualifying OOH nights, splits
//! them into weekday (Monday to Thursday) and weekend (Friday to Sunday)
//! buckets in each shift's own IANA timezone, and prices the totals per user.
//! An optional axum router exposes the calculation over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
