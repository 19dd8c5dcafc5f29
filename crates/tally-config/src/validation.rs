//! Thresholds the validators compare against.

use serde::{Deserialize, Serialize};
use tally_core::Money;

use crate::ConfigError;

/// Absolute tolerance for declared vs. computed personnel cost.
const fn default_personnel_tolerance() -> Money {
    1_000
}

/// Maximum total concurrent participation, in percent.
const fn default_participation_limit() -> f64 {
    100.0
}

/// Maximum spend-to-budget ratio before a period is flagged.
const fn default_max_usage_rate() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ValidationSettings {
    #[serde(default = "default_personnel_tolerance")]
    pub personnel_tolerance: Money,

    #[serde(default = "default_participation_limit")]
    pub participation_limit: f64,

    #[serde(default = "default_max_usage_rate")]
    pub max_usage_rate: f64,
}

impl ValidationSettings {
    /// Reject thresholds the validators cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.personnel_tolerance < 0 {
            return Err(ConfigError::InvalidValue {
                field: "validation.personnel_tolerance".into(),
                reason: format!("must be >= 0, got {}", self.personnel_tolerance),
            });
        }
        if !(self.participation_limit.is_finite() && self.participation_limit > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "validation.participation_limit".into(),
                reason: format!("must be a positive percentage, got {}", self.participation_limit),
            });
        }
        if !(self.max_usage_rate.is_finite() && self.max_usage_rate > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "validation.max_usage_rate".into(),
                reason: format!("must be a positive ratio, got {}", self.max_usage_rate),
            });
        }
        Ok(())
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            personnel_tolerance: default_personnel_tolerance(),
            participation_limit: default_participation_limit(),
            max_usage_rate: default_max_usage_rate(),
        }
    }
}
