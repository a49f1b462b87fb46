//! Engine configuration.
//!
//! All tunables live in one [`EngineConfig`] value that is passed by
//! reference to validation, runners and the replay controller. There are
//! no process-wide settings.

use super::error::{CoreError, Result};
use super::serialization::deserialize_value;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay between two ticks at speed 1.0.
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(500);

/// Default cap on the number of array elements a sort may animate.
pub const DEFAULT_MAX_ARRAY_LEN: usize = 120;

/// Default largest value a sort bar may hold.
pub const DEFAULT_MAX_VALUE: u32 = 999;

/// Default residual-capacity tolerance for max-flow.
pub const DEFAULT_FLOW_EPSILON: f64 = 1e-9;

/// Configuration shared by every run of an engine.
///
/// # Example
///
/// ```
/// use stepwise::EngineConfig;
/// use std::time::Duration;
///
/// let config = EngineConfig {
///     base_interval: Duration::from_millis(250),
///     ..EngineConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay between two ticks at speed 1.0. The delay actually used is
    /// `base_interval / speed`.
    pub base_interval: Duration,
    /// Speed multiplier a freshly started run plays at.
    pub initial_speed: f64,
    /// Largest array a sorting run accepts.
    pub max_array_len: usize,
    /// Largest value a single array element may hold.
    pub max_value: u32,
    /// Tolerance below which a residual capacity counts as zero.
    pub flow_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_interval: DEFAULT_BASE_INTERVAL,
            initial_speed: 1.0,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            max_value: DEFAULT_MAX_VALUE,
            flow_epsilon: DEFAULT_FLOW_EPSILON,
        }
    }
}

impl EngineConfig {
    /// Loads a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `CoreError::Deserialization` on malformed JSON and
    /// `CoreError::InvalidConfig` when a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = deserialize_value(json.as_bytes())?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field is within its permitted range.
    pub fn validate(&self) -> Result<()> {
        if self.base_interval.is_zero() {
            return Err(CoreError::invalid_config(
                "base_interval",
                "must be greater than zero",
            ));
        }
        if !(self.initial_speed.is_finite() && self.initial_speed > 0.0) {
            return Err(CoreError::invalid_config(
                "initial_speed",
                format!("must be a positive number, got {}", self.initial_speed),
            ));
        }
        if self.max_array_len == 0 {
            return Err(CoreError::invalid_config(
                "max_array_len",
                "must allow at least one element",
            ));
        }
        if !(self.flow_epsilon.is_finite() && self.flow_epsilon >= 0.0) {
            return Err(CoreError::invalid_config(
                "flow_epsilon",
                format!("must be a non-negative number, got {}", self.flow_epsilon),
            ));
        }
        Ok(())
    }
}
