//! Engine settings: consistency gate and solver limits.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AhpError;

/// Conventional acceptability threshold for the consistency ratio.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Power-iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Component-wise change below which power iteration is considered converged.
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 1e-10;

/// Tunables for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Largest acceptable consistency ratio (inclusive).
    #[serde(alias = "consistencyThreshold")]
    pub consistency_threshold: f64,

    /// Iteration cap for the priority solver.
    #[serde(alias = "maxIterations")]
    pub max_iterations: usize,

    /// Convergence tolerance for the priority solver.
    #[serde(alias = "convergenceTolerance")]
    pub convergence_tolerance: f64,

    /// Solve per-criterion alternative matrices on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            consistency_threshold: DEFAULT_CONSISTENCY_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            parallel: true,
        }
    }
}

impl EngineSettings {
    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<(), AhpError> {
        if !self.consistency_threshold.is_finite() || self.consistency_threshold < 0.0 {
            return Err(AhpError::InvalidSettings {
                reason: format!(
                    "consistency threshold must be a non-negative number, got {}",
                    self.consistency_threshold
                ),
            });
        }
        if self.max_iterations == 0 {
            return Err(AhpError::InvalidSettings {
                reason: "max iterations must be at least 1".to_string(),
            });
        }
        if !self.convergence_tolerance.is_finite() || self.convergence_tolerance <= 0.0 {
            return Err(AhpError::InvalidSettings {
                reason: format!(
                    "convergence tolerance must be positive, got {}",
                    self.convergence_tolerance
                ),
            });
        }
        Ok(())
    }
}

/// Partial settings carried by a hierarchy document.
///
/// Absent fields keep the value of the settings they are applied to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverride {
    #[serde(default, alias = "consistencyThreshold")]
    pub consistency_threshold: Option<f64>,

    #[serde(default, alias = "maxIterations")]
    pub max_iterations: Option<usize>,

    #[serde(default, alias = "convergenceTolerance")]
    pub convergence_tolerance: Option<f64>,
}

impl SettingsOverride {
    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.consistency_threshold.is_none()
            && self.max_iterations.is_none()
            && self.convergence_tolerance.is_none()
    }

    /// Layers this override on top of `base`.
    pub fn apply(&self, base: &EngineSettings) -> EngineSettings {
        EngineSettings {
            consistency_threshold: self
                .consistency_threshold
                .unwrap_or(base.consistency_threshold),
            max_iterations: self.max_iterations.unwrap_or(base.max_iterations),
            convergence_tolerance: self
                .convergence_tolerance
                .unwrap_or(base.convergence_tolerance),
            parallel: base.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventional_values() {
        let settings = EngineSettings::default();
        assert_eq!(settings.consistency_threshold, 0.10);
        assert_eq!(settings.max_iterations, 100);
        assert_eq!(settings.convergence_tolerance, 1e-10);
        assert!(settings.parallel);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn deserializes_camel_case_and_fills_defaults() {
        let json = r#"{"consistencyThreshold": 0.2, "maxIterations": 50}"#;
        let settings: EngineSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.consistency_threshold, 0.2);
        assert_eq!(settings.max_iterations, 50);
        assert_eq!(settings.convergence_tolerance, 1e-10);
    }

    #[test]
    fn rejects_negative_threshold() {
        let settings = EngineSettings {
            consistency_threshold: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(AhpError::InvalidSettings { .. })
        ));
    }

    #[test]
    fn rejects_zero_iterations() {
        let settings = EngineSettings {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        for tolerance in [0.0, -1e-10, f64::NAN] {
            let settings = EngineSettings {
                convergence_tolerance: tolerance,
                ..Default::default()
            };
            assert!(settings.validate().is_err());
        }
    }

    #[test]
    fn override_replaces_only_given_fields() {
        let base = EngineSettings {
            max_iterations: 40,
            parallel: false,
            ..Default::default()
        };
        let patch = SettingsOverride {
            consistency_threshold: Some(0.2),
            ..Default::default()
        };
        let merged = patch.apply(&base);
        assert_eq!(merged.consistency_threshold, 0.2);
        assert_eq!(merged.max_iterations, 40);
        assert!(!merged.parallel);
        assert!(SettingsOverride::default().is_empty());
        assert!(!patch.is_empty());
    }
}
