//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading compensation
//! configuration from a YAML file.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono_tz::Tz;

use crate::calculation::{CompensationCalculator, RateStrategy, TwoBucketRates};
use crate::error::{CompensationError, CompensationResult};

use super::types::CompensationConfig;

/// Loads and provides access to compensation configuration.
///
/// The loader validates the file eagerly: once a `ConfigLoader` exists its
/// default timezone and rate strategy are known to be usable.
///
/// # File Format
///
/// ```text
/// currency: "GBP"
/// timezone: "Europe/London"   # optional
/// rates:
///   weekday: 50
///   weekend: 75
///   per_weekday:              # optional, all seven days
///     monday: 50
///     ...
/// ```
///
/// # Example
///
/// ```no_run
/// use ooh_compensation::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/compensation.yaml").unwrap();
/// let calculator = loader.calculator();
/// println!("Paying in {}", loader.config().currency);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CompensationConfig,
    default_timezone: Option<Tz>,
    rates: Arc<dyn RateStrategy>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            config: CompensationConfig::default(),
            default_timezone: None,
            rates: Arc::new(TwoBucketRates::default()),
        }
    }
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing or unreadable ([`CompensationError::ConfigNotFound`])
    /// - The file contains invalid YAML, or values that fail validation
    ///   ([`CompensationError::ConfigParseError`])
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ooh_compensation::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/compensation.yaml")?;
    /// # Ok::<(), ooh_compensation::error::CompensationError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> CompensationResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let config = Self::load_yaml::<CompensationConfig>(path)?;

        Self::from_config(config).map_err(|e| CompensationError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Builds a loader from an in-memory configuration.
    ///
    /// # Errors
    ///
    /// Whatever [`CompensationConfig::validate`] rejects.
    pub fn from_config(config: CompensationConfig) -> CompensationResult<Self> {
        config.validate()?;
        let default_timezone = config.default_timezone()?;
        let rates = config.rate_strategy()?;

        Ok(Self {
            config,
            default_timezone,
            rates,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> CompensationResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| CompensationError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| CompensationError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &CompensationConfig {
        &self.config
    }

    /// The zone applied to shifts that do not name one.
    pub fn default_timezone(&self) -> Option<Tz> {
        self.default_timezone
    }

    /// The configured rate strategy.
    pub fn rates(&self) -> &dyn RateStrategy {
        self.rates.as_ref()
    }

    /// A calculator sharing the configured rate strategy.
    pub fn calculator(&self) -> CompensationCalculator {
        CompensationCalculator::from_shared(Arc::clone(&self.rates))
    }
}
