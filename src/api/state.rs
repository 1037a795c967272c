//! Application state for the OOH compensation API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::CompensationCalculator;
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded configuration and a calculator built from its rates.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    calculator: CompensationCalculator,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let calculator = config.calculator();
        Self {
            config: Arc::new(config),
            calculator,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the calculator for the configured rates.
    pub fn calculator(&self) -> &CompensationCalculator {
        &self.calculator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_calculator_follows_config() {
        let state = AppState::new(ConfigLoader::default());
        assert_eq!(state.calculator().rates().weekend_rate(), Decimal::from(75));
        assert_eq!(state.config().config().currency, "GBP");
    }
}
