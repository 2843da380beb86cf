//! Priority Vector - normalized weights keyed by element name.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeSet;

/// Tolerance for "weights sum to one".
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Element weights in matrix order.
///
/// Serializes as a JSON object preserving element order.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityVector {
    entries: Vec<(String, f64)>,
}

impl PriorityVector {
    /// Pairs element names with weights. Both slices must have equal length.
    pub(crate) fn new(elements: &[String], weights: &[f64]) -> Self {
        debug_assert_eq!(elements.len(), weights.len());
        Self {
            entries: elements
                .iter()
                .cloned()
                .zip(weights.iter().copied())
                .collect(),
        }
    }

    /// Builds a vector from explicit (name, weight) pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(n, w)| (n.into(), w)).collect(),
        }
    }

    /// Returns the weight of an element.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| *w)
    }

    /// Iterates (name, weight) in matrix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, w)| (n.as_str(), *w))
    }

    /// Iterates element names in matrix order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Returns the set of element names.
    pub fn name_set(&self) -> BTreeSet<&str> {
        self.names().collect()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Returns true if the weights sum to one within [`WEIGHT_SUM_TOLERANCE`].
    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }
}

impl Serialize for PriorityVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, weight) in &self.entries {
            map.serialize_entry(name, weight)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        let v = PriorityVector::from_pairs([("A", 0.75), ("B", 0.25)]);
        assert_eq!(v.get("A"), Some(0.75));
        assert_eq!(v.get("C"), None);
        assert_eq!(v.len(), 2);
        assert!(v.is_normalized());
    }

    #[test]
    fn detects_unnormalized_weights() {
        let v = PriorityVector::from_pairs([("A", 0.5), ("B", 0.4)]);
        assert!(!v.is_normalized());
    }

    #[test]
    fn serializes_as_ordered_map() {
        let v = PriorityVector::from_pairs([("Speed", 0.5), ("Cost", 0.5)]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"Speed":0.5,"Cost":0.5}"#);
    }
}
