//! Engine configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::ahp::{
    EngineSettings, DEFAULT_CONSISTENCY_THRESHOLD, DEFAULT_CONVERGENCE_TOLERANCE,
    DEFAULT_MAX_ITERATIONS,
};

/// Upper bound on the evaluation deadline.
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Upper bound on report rounding.
const MAX_REPORT_PRECISION: u32 = 12;

/// Engine configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Largest acceptable consistency ratio
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Power-iteration cap
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Power-iteration convergence tolerance
    #[serde(default = "default_convergence_tolerance")]
    pub convergence_tolerance: f64,

    /// Solve alternative matrices in parallel
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Deadline for one evaluation in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Decimal places in rendered reports
    #[serde(default = "default_report_precision")]
    pub report_precision: u32,
}

impl EngineConfig {
    /// Engine settings described by this section
    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            consistency_threshold: self.consistency_threshold,
            max_iterations: self.max_iterations,
            convergence_tolerance: self.convergence_tolerance,
            parallel: self.parallel,
        }
    }

    /// Evaluation deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.settings()
            .validate()
            .map_err(|e| ValidationError::InvalidEngineSetting(e.to_string()))?;
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.report_precision > MAX_REPORT_PRECISION {
            return Err(ValidationError::PrecisionTooLarge);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: default_consistency_threshold(),
            max_iterations: default_max_iterations(),
            convergence_tolerance: default_convergence_tolerance(),
            parallel: default_parallel(),
            timeout_secs: default_timeout(),
            report_precision: default_report_precision(),
        }
    }
}

fn default_consistency_threshold() -> f64 {
    DEFAULT_CONSISTENCY_THRESHOLD
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_convergence_tolerance() -> f64 {
    DEFAULT_CONVERGENCE_TOLERANCE
}

fn default_parallel() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_report_precision() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.settings(), EngineSettings::default());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.report_precision, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let config = EngineConfig {
            consistency_threshold: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidEngineSetting(_))
        ));
    }

    #[test]
    fn test_timeout_bounds() {
        for timeout_secs in [0, MAX_TIMEOUT_SECS + 1] {
            let config = EngineConfig {
                timeout_secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }

    #[test]
    fn test_precision_bound() {
        let config = EngineConfig {
            report_precision: 13,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::PrecisionTooLarge));
    }
}
