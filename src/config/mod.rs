//! Configuration loading for OOH compensation.
//!
//! This module loads the currency, default timezone and rate table from a
//! YAML file and turns them into a ready-to-use rate strategy.
//!
//! # Example
//!
//! ```no_run
//! use ooh_compensation::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/compensation.yaml").unwrap();
//! println!("Currency: {}", config.config().currency);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CompensationConfig, RatesConfig, WeekdayRatesConfig};
