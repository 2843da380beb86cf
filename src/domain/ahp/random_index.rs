//! Saaty's random consistency index.

/// Largest matrix order with a published random index.
pub const MAX_MATRIX_ORDER: usize = 15;

/// Mean consistency index of random reciprocal matrices, indexed by order - 1.
const SAATY_RANDOM_INDEX: [f64; MAX_MATRIX_ORDER] = [
    0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51, 1.48, 1.56, 1.57, 1.59,
];

/// Returns RI for a matrix of order `n`, or `None` outside 1..=15.
pub fn random_index(n: usize) -> Option<f64> {
    if n == 0 {
        return None;
    }
    SAATY_RANDOM_INDEX.get(n - 1).copied()
}
