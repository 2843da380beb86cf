//! Comparison Matrix - reciprocal pairwise-comparison matrix built from named judgments.

use nalgebra::DMatrix;
use std::collections::HashMap;

use super::judgment::{validate_name, Judgment, JUDGMENT_TOLERANCE};
use super::random_index::MAX_MATRIX_ORDER;
use crate::domain::foundation::{AhpError, MatrixId};

/// A complete, reciprocal comparison matrix over an ordered element set.
///
/// # Invariants
/// - Diagonal entries are exactly 1.
/// - For every pair, `m[i][j] * m[j][i] == 1` holds exactly in `f64`. A
///   non-integer intensity may sit a few ulps from the judged value when its
///   plain reciprocal does not multiply back to 1.
/// - Every off-diagonal entry lies in [1/9, 9].
/// - Every unordered pair was judged at least once.
/// - Never mutated after [`ComparisonMatrix::build`] succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMatrix {
    id: MatrixId,
    elements: Vec<String>,
    values: DMatrix<f64>,
}

impl ComparisonMatrix {
    /// Builds a matrix from an ordered element list and a judgment set.
    ///
    /// The element list fixes row/column order. Only one direction per pair
    /// needs to be supplied; restating a pair is allowed when the values agree
    /// within [`JUDGMENT_TOLERANCE`].
    ///
    /// # Errors
    /// - Empty or malformed element list, or duplicated element names
    /// - More elements than the random index table covers
    /// - Judgment naming an unknown element, or an element against itself
    /// - Judgment value outside [1/9, 9]
    /// - Two judgments of the same pair that disagree
    /// - Any unordered pair left without a judgment
    pub fn build(
        id: MatrixId,
        elements: &[String],
        judgments: &[Judgment],
    ) -> Result<Self, AhpError> {
        if elements.is_empty() {
            return Err(AhpError::EmptyElementSet { matrix: id });
        }
        if elements.len() > MAX_MATRIX_ORDER {
            return Err(AhpError::OrderTooLarge {
                matrix: id,
                order: elements.len(),
                max: MAX_MATRIX_ORDER,
            });
        }

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(elements.len());
        for (i, name) in elements.iter().enumerate() {
            validate_name(name)?;
            if index.insert(name.as_str(), i).is_some() {
                return Err(AhpError::DuplicateElement {
                    matrix: id,
                    element: name.clone(),
                });
            }
        }

        let n = elements.len();
        let mut values = DMatrix::<f64>::identity(n, n);
        let mut judged = DMatrix::<bool>::from_element(n, n, false);

        for judgment in judgments {
            let lookup = |name: &str| {
                index
                    .get(name)
                    .copied()
                    .ok_or_else(|| AhpError::UnknownElement {
                        matrix: id.clone(),
                        element: name.to_string(),
                    })
            };
            let a = lookup(&judgment.element_a)?;
            let b = lookup(&judgment.element_b)?;

            if a == b {
                return Err(AhpError::SelfComparison {
                    matrix: id,
                    element: judgment.element_a.clone(),
                });
            }
            if !judgment.is_on_scale() {
                return Err(AhpError::ValueOutOfRange {
                    matrix: id,
                    element_a: judgment.element_a.clone(),
                    element_b: judgment.element_b.clone(),
                    value: judgment.value,
                });
            }

            if judged[(a, b)] {
                if (values[(a, b)] - judgment.value).abs() > JUDGMENT_TOLERANCE {
                    return Err(AhpError::ConflictingJudgment {
                        matrix: id,
                        element_a: judgment.element_a.clone(),
                        element_b: judgment.element_b.clone(),
                        first: values[(a, b)],
                        second: judgment.value,
                    });
                }
                tracing::debug!(
                    matrix = %id,
                    a = %judgment.element_a,
                    b = %judgment.element_b,
                    "Ignoring restated judgment"
                );
                continue;
            }

            let (a_preferred, intensity) = judgment.intensity();
            let (p, o) = if a_preferred { (a, b) } else { (b, a) };
            let (high, low) = reciprocal_pair(intensity);
            values[(p, o)] = high;
            values[(o, p)] = low;
            judged[(p, o)] = true;
            judged[(o, p)] = true;
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if !judged[(i, j)] {
                    return Err(AhpError::IncompleteComparisons {
                        matrix: id,
                        element_a: elements[i].clone(),
                        element_b: elements[j].clone(),
                    });
                }
            }
        }

        tracing::debug!(matrix = %id, order = n, "Built comparison matrix");

        Ok(Self {
            id,
            elements: elements.to_vec(),
            values,
        })
    }

    /// Returns which matrix of the hierarchy this is.
    pub fn id(&self) -> &MatrixId {
        &self.id
    }

    /// Returns the element names in index order.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Returns the matrix order.
    pub fn order(&self) -> usize {
        self.elements.len()
    }

    /// Returns true for single-element matrices, which need no solving.
    pub fn is_trivial(&self) -> bool {
        self.order() < 2
    }

    /// Returns the raw entry at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    /// Returns how strongly `a` is preferred over `b`, by element name.
    pub fn value(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Some(self.values[(i, j)])
    }

    /// Returns the index of an element.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.elements.iter().position(|e| e == name)
    }

    /// Returns the underlying dense matrix.
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Checks the reciprocal structure of the stored entries.
    pub fn is_reciprocal(&self) -> bool {
        let n = self.order();
        for i in 0..n {
            if self.values[(i, i)] != 1.0 {
                return false;
            }
            for j in (i + 1)..n {
                if self.values[(i, j)] * self.values[(j, i)] != 1.0 {
                    return false;
                }
            }
        }
        true
    }
}

/// How far, in ulps, an intensity may move to reach an exact reciprocal pair.
const RECIPROCAL_SEARCH_ULPS: u64 = 64;

/// Returns `(high, low)` with `high * low == 1.0` exactly and `high` within
/// [`RECIPROCAL_SEARCH_ULPS`] of `intensity` (which must be >= 1).
///
/// Integer intensities keep their value. Some doubles have no partner whose
/// rounded product is 1; those move to the nearest neighbour that has one.
fn reciprocal_pair(intensity: f64) -> (f64, f64) {
    let bits = intensity.to_bits();
    for step in 0..=RECIPROCAL_SEARCH_ULPS {
        for high in [f64::from_bits(bits + step), f64::from_bits(bits - step)] {
            if let Some(low) = exact_reciprocal(high) {
                return (high, low);
            }
        }
    }
    (intensity, intensity.recip())
}

/// Finds a double `r` next to `1 / x` with `x * r == 1.0`.
fn exact_reciprocal(x: f64) -> Option<f64> {
    let r = x.recip();
    let bits = r.to_bits();
    [r, f64::from_bits(bits - 1), f64::from_bits(bits + 1)]
        .into_iter()
        .find(|low| x * low == 1.0)
}
