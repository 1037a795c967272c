//! HTTP API module for the OOH compensation engine.
//!
//! This module provides the REST API endpoint for pricing on-call users'
//! out-of-hours nights.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, ShiftRequest, UserRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
