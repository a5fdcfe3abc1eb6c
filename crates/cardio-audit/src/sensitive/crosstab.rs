//! Grouped statistics of a sensitive attribute against the outcome.
//!
//! All functions take positional column values (as produced by
//! [`crate::utils::numeric_values`] and [`crate::utils::string_values`]) and
//! ignore rows where either side is null.

use crate::types::CategoryRate;
use crate::utils::round_to;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Row-normalized contingency table.
///
/// `proportions[i][j]` is the share of rows in `categories[i]` whose outcome
/// equals `outcomes[j]`. Each row sums to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crosstab {
    pub categories: Vec<String>,
    pub outcomes: Vec<f64>,
    pub proportions: Vec<Vec<f64>>,
}

impl Crosstab {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Distinct outcome values in ascending order.
pub fn distinct_outcomes(outcomes: &[Option<f64>]) -> Vec<f64> {
    let mut distinct: Vec<f64> = outcomes
        .iter()
        .flatten()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();
    distinct.sort_by(|a, b| a.total_cmp(b));
    distinct.dedup();
    distinct
}

fn complete_pairs<'a, T>(
    left: &'a [Option<T>],
    outcomes: &'a [Option<f64>],
) -> impl Iterator<Item = (&'a T, f64)> + 'a {
    left.iter()
        .zip(outcomes.iter())
        .filter_map(|(l, o)| Some((l.as_ref()?, (*o)?)))
        .filter(|(_, o)| !o.is_nan())
}

/// Cross-tabulate a categorical column against the outcome, normalized by
/// category.
pub fn crosstab_normalized(categories: &[Option<String>], outcomes: &[Option<f64>]) -> Crosstab {
    let outcome_values = distinct_outcomes(outcomes);
    let mut counts: BTreeMap<&str, Vec<usize>> = BTreeMap::new();

    for (category, outcome) in complete_pairs(categories, outcomes) {
        let row = counts
            .entry(category.as_str())
            .or_insert_with(|| vec![0; outcome_values.len()]);
        if let Some(idx) = outcome_values.iter().position(|v| *v == outcome) {
            row[idx] += 1;
        }
    }

    let mut result = Crosstab {
        categories: Vec::with_capacity(counts.len()),
        outcomes: outcome_values,
        proportions: Vec::with_capacity(counts.len()),
    };

    for (category, row) in counts {
        let total: usize = row.iter().sum();
        result.categories.push(category.to_string());
        result
            .proportions
            .push(row.iter().map(|c| *c as f64 / total as f64).collect());
    }

    result
}

/// Mean outcome per category, rounded to 3 decimals, categories ascending.
pub fn outcome_rate_by_category(
    categories: &[Option<String>],
    outcomes: &[Option<f64>],
) -> Vec<CategoryRate> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (category, outcome) in complete_pairs(categories, outcomes) {
        let entry = sums.entry(category.as_str()).or_insert((0.0, 0));
        entry.0 += outcome;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(category, (sum, n))| CategoryRate {
            category: category.to_string(),
            rate: round_to(sum / n as f64, 3),
        })
        .collect()
}

/// Group a numeric column by outcome value, outcomes ascending.
///
/// Outcome groups with no non-null value are omitted.
pub fn group_values_by_outcome(
    values: &[Option<f64>],
    outcomes: &[Option<f64>],
) -> Vec<(f64, Vec<f64>)> {
    let mut groups: Vec<(f64, Vec<f64>)> = distinct_outcomes(outcomes)
        .into_iter()
        .map(|o| (o, Vec::new()))
        .collect();

    for (value, outcome) in complete_pairs(values, outcomes) {
        if value.is_nan() {
            continue;
        }
        if let Some((_, group)) = groups.iter_mut().find(|(o, _)| *o == outcome) {
            group.push(*value);
        }
    }

    groups.retain(|(_, group)| !group.is_empty());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sexes() -> Vec<Option<String>> {
        ["M", "F", "M", "M", "F"]
            .iter()
            .map(|s| Some(s.to_string()))
            .collect()
    }

    fn disease() -> Vec<Option<f64>> {
        vec![Some(1.0), Some(0.0), Some(1.0), Some(0.0), Some(0.0)]
    }

    // ==================== crosstab tests ====================

    #[test]
    fn test_crosstab_rows_sum_to_one() {
        let table = crosstab_normalized(&sexes(), &disease());

        assert_eq!(table.categories, vec!["F", "M"]);
        assert_eq!(table.outcomes, vec![0.0, 1.0]);
        for row in &table.proportions {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
        assert_eq!(table.proportions[0], vec![1.0, 0.0]);
        assert!((table.proportions[1][1] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_crosstab_ignores_incomplete_rows() {
        let categories = vec![Some("M".to_string()), None, Some("F".to_string())];
        let outcomes = vec![Some(1.0), Some(0.0), None];
        let table = crosstab_normalized(&categories, &outcomes);

        assert_eq!(table.categories, vec!["M"]);
        assert_eq!(table.outcomes, vec![0.0, 1.0]);
        assert_eq!(table.proportions, vec![vec![0.0, 1.0]]);
    }

    #[test]
    fn test_crosstab_empty() {
        let table = crosstab_normalized(&[], &[]);
        assert!(table.is_empty());
    }

    // ==================== outcome rate tests ====================

    #[test]
    fn test_outcome_rate_by_category() {
        let rates = outcome_rate_by_category(&sexes(), &disease());
        assert_eq!(
            rates,
            vec![
                CategoryRate { category: "F".to_string(), rate: 0.0 },
                CategoryRate { category: "M".to_string(), rate: 0.667 },
            ]
        );
    }

    // ==================== grouping tests ====================

    #[test]
    fn test_group_values_by_outcome() {
        let ages = vec![Some(63.0), Some(41.0), Some(58.0), None, Some(39.0)];
        let groups = group_values_by_outcome(&ages, &disease());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], (0.0, vec![41.0, 39.0]));
        assert_eq!(groups[1], (1.0, vec![63.0, 58.0]));
    }

    #[test]
    fn test_distinct_outcomes_sorted() {
        let outcomes = vec![Some(1.0), None, Some(0.0), Some(1.0)];
        assert_eq!(distinct_outcomes(&outcomes), vec![0.0, 1.0]);
    }
}
