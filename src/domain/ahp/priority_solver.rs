//! Priority Vector Solver - principal eigenvector and consistency ratio.

use nalgebra::DVector;
use serde::Serialize;

use super::random_index::random_index;
use super::settings::EngineSettings;
use super::{ComparisonMatrix, PriorityVector};
use crate::domain::foundation::AhpError;

/// Consistency measures of one solved matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Consistency {
    /// Principal eigenvalue estimate.
    pub lambda_max: f64,
    /// Consistency index, (λmax − n) / (n − 1), clamped at zero.
    pub index: f64,
    /// Consistency ratio, CI / RI(n).
    pub ratio: f64,
}

impl Consistency {
    /// Perfect consistency for a matrix of order `n`.
    pub fn perfect(n: usize) -> Self {
        Self {
            lambda_max: n as f64,
            index: 0.0,
            ratio: 0.0,
        }
    }
}

/// Output of solving one comparison matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub priorities: PriorityVector,
    pub consistency: Consistency,
    /// Power iterations used; zero for single-element matrices.
    pub iterations: usize,
}

impl Solution {
    /// Returns the consistency ratio.
    pub fn consistency_ratio(&self) -> f64 {
        self.consistency.ratio
    }
}

/// Eigenvector-method solver.
///
/// Stateless apart from its limits; one instance can solve any number of
/// matrices from any number of threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrioritySolver {
    max_iterations: usize,
    tolerance: f64,
}

impl PrioritySolver {
    /// Creates a solver with explicit limits.
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Creates a solver using the limits from engine settings.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.max_iterations, settings.convergence_tolerance)
    }

    /// Derives the priority vector and consistency ratio of a matrix.
    ///
    /// # Algorithm
    /// 1. Power iteration from the uniform vector, L1-renormalizing each step,
    ///    until the largest component change is below the tolerance.
    /// 2. λmax = mean over i of (M·w)[i] / w[i].
    /// 3. CI = (λmax − n) / (n − 1) for n > 2, else 0.
    /// 4. CR = CI / RI(n), or 0 where RI(n) is 0.
    ///
    /// # Errors
    /// - `NotConverged` when the iteration cap is reached first
    /// - `NonFiniteVector` when an iterate overflows or vanishes
    /// - `DegenerateWeight` when any converged weight is zero
    pub fn solve(&self, matrix: &ComparisonMatrix) -> Result<Solution, AhpError> {
        let n = matrix.order();
        if matrix.is_trivial() {
            return Ok(Solution {
                priorities: PriorityVector::new(matrix.elements(), &[1.0]),
                consistency: Consistency::perfect(n),
                iterations: 0,
            });
        }

        let values = matrix.values();
        let mut weights = DVector::<f64>::from_element(n, 1.0 / n as f64);
        let mut delta = f64::INFINITY;
        let mut converged_at = None;

        for iteration in 1..=self.max_iterations {
            let mut next = values * &weights;
            let total: f64 = next.iter().sum();
            if !total.is_finite() || total <= 0.0 {
                return Err(AhpError::NonFiniteVector {
                    matrix: matrix.id().clone(),
                });
            }
            next /= total;

            delta = next
                .iter()
                .zip(weights.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            weights = next;

            if delta < self.tolerance {
                converged_at = Some(iteration);
                break;
            }
        }

        let iterations = converged_at.ok_or_else(|| AhpError::NotConverged {
            matrix: matrix.id().clone(),
            iterations: self.max_iterations,
            delta,
        })?;

        if let Some(i) = weights.iter().position(|w| *w <= 0.0) {
            return Err(AhpError::DegenerateWeight {
                matrix: matrix.id().clone(),
                element: matrix.elements()[i].clone(),
            });
        }

        let product = values * &weights;
        let lambda_max = product
            .iter()
            .zip(weights.iter())
            .map(|(mw, w)| mw / w)
            .sum::<f64>()
            / n as f64;

        let index = if n > 2 {
            ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0)
        } else {
            0.0
        };
        let ratio = match random_index(n) {
            Some(ri) if ri > 0.0 => index / ri,
            _ => 0.0,
        };

        tracing::debug!(
            matrix = %matrix.id(),
            order = n,
            iterations,
            lambda_max,
            cr = ratio,
            "Solved priority vector"
        );

        let weights: Vec<f64> = weights.iter().copied().collect();
        Ok(Solution {
            priorities: PriorityVector::new(matrix.elements(), &weights),
            consistency: Consistency {
                lambda_max,
                index,
                ratio,
            },
            iterations,
        })
    }
}

impl Default for PrioritySolver {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}
