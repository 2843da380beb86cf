//! Pairwise judgments on the Saaty scale.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AhpError;

/// Smallest value on the Saaty scale (extreme preference of B over A).
pub const SCALE_MIN: f64 = 1.0 / 9.0;

/// Largest value on the Saaty scale (extreme preference of A over B).
pub const SCALE_MAX: f64 = 9.0;

/// Absolute tolerance used to treat two judgments of the same pair as equal.
pub const JUDGMENT_TOLERANCE: f64 = 1e-6;

/// Intensities this close to an integer are stored as that integer.
const INTENSITY_SNAP: f64 = 1e-9;

/// A single pairwise comparison: how strongly `element_a` is preferred over `element_b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    #[serde(alias = "elementA")]
    pub element_a: String,
    #[serde(alias = "elementB")]
    pub element_b: String,
    pub value: f64,
}

impl Judgment {
    /// Creates a new judgment.
    pub fn new(element_a: impl Into<String>, element_b: impl Into<String>, value: f64) -> Self {
        Self {
            element_a: element_a.into(),
            element_b: element_b.into(),
            value,
        }
    }

    /// Returns true if the value lies on the closed Saaty range [1/9, 9].
    ///
    /// A tiny slack absorbs `1.0 / 9.0` computed by the caller.
    pub fn is_on_scale(&self) -> bool {
        self.value.is_finite()
            && self.value >= SCALE_MIN - INTENSITY_SNAP
            && self.value <= SCALE_MAX + INTENSITY_SNAP
    }

    /// Returns whether `element_a` is the preferred side, and the preference
    /// intensity (>= 1) expressed from the preferred side.
    pub(crate) fn intensity(&self) -> (bool, f64) {
        if self.value >= 1.0 {
            (true, snap_intensity(self.value))
        } else {
            (false, snap_intensity(self.value.recip()))
        }
    }
}

/// A pairwise comparison of two alternatives judged under one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeJudgment {
    pub criterion: String,
    #[serde(alias = "elementA")]
    pub element_a: String,
    #[serde(alias = "elementB")]
    pub element_b: String,
    pub value: f64,
}

impl AlternativeJudgment {
    /// Creates a new alternative judgment.
    pub fn new(
        criterion: impl Into<String>,
        element_a: impl Into<String>,
        element_b: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            criterion: criterion.into(),
            element_a: element_a.into(),
            element_b: element_b.into(),
            value,
        }
    }

    /// Drops the criterion, leaving the plain pairwise judgment.
    pub fn to_judgment(&self) -> Judgment {
        Judgment::new(self.element_a.clone(), self.element_b.clone(), self.value)
    }
}

fn snap_intensity(intensity: f64) -> f64 {
    let rounded = intensity.round();
    if (intensity - rounded).abs() <= INTENSITY_SNAP {
        rounded
    } else {
        intensity
    }
}

/// Checks that an element or criterion name is usable as an identity.
///
/// Names must be non-empty and must not carry leading or trailing whitespace,
/// since `"Cost"` and `"Cost "` would otherwise silently become two elements.
pub fn validate_name(name: &str) -> Result<(), AhpError> {
    if name.trim().is_empty() || name.trim() != name {
        return Err(AhpError::MalformedName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Collects element names in first-seen order from a judgment list.
pub fn elements_in_first_seen_order<'a, I>(judgments: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Judgment>,
{
    let mut elements: Vec<String> = Vec::new();
    for judgment in judgments {
        for name in [&judgment.element_a, &judgment.element_b] {
            if !elements.iter().any(|e| e == name) {
                elements.push(name.clone());
            }
        }
    }
    elements
}
