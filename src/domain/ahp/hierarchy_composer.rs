//! Hierarchy Composer - weighted synthesis of local priorities into a global ranking.

use serde::Serialize;
use std::collections::BTreeMap;

use super::PriorityVector;
use crate::domain::foundation::AhpError;

/// One alternative with its composed global score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAlternative {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub alternative: String,
    pub score: f64,
}

/// Two-level hierarchy synthesis.
pub struct HierarchyComposer;

impl HierarchyComposer {
    /// Composes criteria weights with per-criterion alternative weights.
    ///
    /// # Algorithm
    /// score(a) = Σ_c criteria[c] × alternatives[c][a], over every criterion in
    /// `criteria`. Scores are not renormalized.
    ///
    /// The ranking is sorted by descending score, ties broken by ascending name.
    ///
    /// # Errors
    /// - `MissingAlternativeWeights` when a criterion has no alternative vector
    /// - `AlternativeSetMismatch` when alternative vectors disagree on names
    ///
    /// Entries of `alternatives` for criteria absent from `criteria` are ignored.
    pub fn compose(
        criteria: &PriorityVector,
        alternatives: &BTreeMap<String, PriorityVector>,
    ) -> Result<Vec<RankedAlternative>, AhpError> {
        let mut reference: Option<(&str, &PriorityVector)> = None;

        for criterion in criteria.names() {
            let local = alternatives.get(criterion).ok_or_else(|| {
                AhpError::MissingAlternativeWeights {
                    criterion: criterion.to_string(),
                }
            })?;

            match reference {
                None => reference = Some((criterion, local)),
                Some((_, expected)) => {
                    if local.name_set() != expected.name_set() {
                        return Err(AhpError::AlternativeSetMismatch {
                            criterion: criterion.to_string(),
                            expected: sorted_names(expected),
                            found: sorted_names(local),
                        });
                    }
                }
            }
        }

        let Some((_, first)) = reference else {
            return Ok(Vec::new());
        };

        let mut scored: Vec<(String, f64)> = first
            .names()
            .map(|alternative| {
                let score: f64 = criteria
                    .iter()
                    .map(|(criterion, weight)| {
                        let local = alternatives
                            .get(criterion)
                            .and_then(|v| v.get(alternative))
                            .unwrap_or(0.0);
                        weight * local
                    })
                    .sum();
                (alternative.to_string(), score)
            })
            .collect();

        scored.sort_by(|(name_a, score_a), (name_b, score_b)| {
            score_b.total_cmp(score_a).then_with(|| name_a.cmp(name_b))
        });

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(i, (alternative, score))| RankedAlternative {
                rank: i + 1,
                alternative,
                score,
            })
            .collect())
    }
}

fn sorted_names(vector: &PriorityVector) -> Vec<String> {
    vector.name_set().into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorKind;

    fn local(pairs: &[(&str, f64)]) -> PriorityVector {
        PriorityVector::from_pairs(pairs.iter().copied())
    }

    fn alternatives(entries: Vec<(&str, PriorityVector)>) -> BTreeMap<String, PriorityVector> {
        entries
            .into_iter()
            .map(|(c, v)| (c.to_string(), v))
            .collect()
    }

    #[test]
    fn weighted_sum_across_criteria() {
        let criteria = local(&[("Cost", 0.25), ("Quality", 0.75)]);
        let alts = alternatives(vec![
            ("Cost", local(&[("A", 0.8), ("B", 0.2)])),
            ("Quality", local(&[("A", 0.6), ("B", 0.4)])),
        ]);

        let ranking = HierarchyComposer::compose(&criteria, &alts).unwrap();
        assert_eq!(ranking[0].alternative, "A");
        assert!((ranking[0].score - 0.65).abs() < 1e-12);
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[1].alternative, "B");
        assert!((ranking[1].score - 0.35).abs() < 1e-12);
    }

    #[test]
    fn scores_sum_to_one_without_renormalizing() {
        let criteria = local(&[("X", 0.2), ("Y", 0.3), ("Z", 0.5)]);
        let alts = alternatives(vec![
            ("X", local(&[("A", 0.1), ("B", 0.6), ("C", 0.3)])),
            ("Y", local(&[("C", 0.5), ("A", 0.25), ("B", 0.25)])),
            ("Z", local(&[("B", 0.7), ("C", 0.1), ("A", 0.2)])),
        ]);

        let ranking = HierarchyComposer::compose(&criteria, &alts).unwrap();
        let total: f64 = ranking.iter().map(|r| r.score).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(ranking[0].alternative, "B");
    }

    #[test]
    fn ties_break_by_ascending_name() {
        let criteria = local(&[("Only", 1.0)]);
        let alts = alternatives(vec![(
            "Only",
            local(&[("Zulu", 0.25), ("Alpha", 0.25), ("Mike", 0.5)]),
        )]);

        let ranking = HierarchyComposer::compose(&criteria, &alts).unwrap();
        let order: Vec<&str> = ranking.iter().map(|r| r.alternative.as_str()).collect();
        assert_eq!(order, vec!["Mike", "Alpha", "Zulu"]);
        assert_eq!(ranking[2].rank, 3);
    }

    #[test]
    fn missing_criterion_vector_fails() {
        let criteria = local(&[("Cost", 0.5), ("Speed", 0.5)]);
        let alts = alternatives(vec![("Cost", local(&[("A", 1.0)]))]);

        let err = HierarchyComposer::compose(&criteria, &alts).unwrap_err();
        assert_eq!(
            err,
            AhpError::MissingAlternativeWeights {
                criterion: "Speed".into()
            }
        );
        assert_eq!(err.kind(), ErrorKind::Structure);
    }

    #[test]
    fn mismatched_alternative_sets_fail() {
        let criteria = local(&[("Cost", 0.5), ("Speed", 0.5)]);
        let alts = alternatives(vec![
            ("Cost", local(&[("A", 0.5), ("B", 0.5)])),
            ("Speed", local(&[("A", 0.5), ("C", 0.5)])),
        ]);

        let err = HierarchyComposer::compose(&criteria, &alts).unwrap_err();
        assert_eq!(
            err,
            AhpError::AlternativeSetMismatch {
                criterion: "Speed".into(),
                expected: vec!["A".into(), "B".into()],
                found: vec!["A".into(), "C".into()],
            }
        );
    }

    #[test]
    fn alternative_order_may_differ_between_criteria() {
        let criteria = local(&[("Cost", 0.5), ("Speed", 0.5)]);
        let alts = alternatives(vec![
            ("Cost", local(&[("A", 0.9), ("B", 0.1)])),
            ("Speed", local(&[("B", 0.3), ("A", 0.7)])),
        ]);

        let ranking = HierarchyComposer::compose(&criteria, &alts).unwrap();
        assert_eq!(ranking[0].alternative, "A");
        assert!((ranking[0].score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn extra_criteria_in_alternatives_are_ignored() {
        let criteria = local(&[("Cost", 1.0)]);
        let alts = alternatives(vec![
            ("Cost", local(&[("A", 0.6), ("B", 0.4)])),
            ("Unused", local(&[("X", 1.0)])),
        ]);

        let ranking = HierarchyComposer::compose(&criteria, &alts).unwrap();
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn empty_criteria_compose_to_empty_ranking() {
        let criteria = PriorityVector::from_pairs(Vec::<(String, f64)>::new());
        let ranking = HierarchyComposer::compose(&criteria, &BTreeMap::new()).unwrap();
        assert!(ranking.is_empty());
    }
}
