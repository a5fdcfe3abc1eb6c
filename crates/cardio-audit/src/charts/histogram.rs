//! Equal-width histogram binning.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split the finite values into `bins` equal-width bins over `[min, max]`.
///
/// Bins are half-open except the last, which also holds `max`, so the
/// counts always sum to the number of finite values. A constant input is
/// spread over `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = finite
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut result: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        result[idx].count += 1;
    }

    result
}

/// Largest bin count, 0 for no bins.
pub fn max_count(bins: &[Bin]) -> usize {
    bins.iter().map(|b| b.count).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_values() {
        let values: Vec<f64> = (0..97).map(|i| 80.0 + i as f64 * 1.3).collect();
        let bins = histogram(&values, 30);

        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let bins = histogram(&[0.0, 10.0], 5);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[4].count, 1);
        assert_eq!(bins[4].end, 10.0);
    }

    #[test]
    fn test_bin_edges_are_contiguous() {
        let bins = histogram(&[0.0, 3.0, 6.0, 9.0], 3);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[0].end, bins[1].start);
        assert_eq!(bins[1].end, bins[2].start);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1, 2]);
    }

    #[test]
    fn test_constant_values_widen_range() {
        let bins = histogram(&[120.0, 120.0, 120.0], 4);
        assert_eq!(bins[0].start, 119.5);
        assert_eq!(bins[3].end, 120.5);
        assert_eq!(max_count(&bins), 3);
    }

    #[test]
    fn test_empty_and_non_finite() {
        assert!(histogram(&[], 30).is_empty());
        assert!(histogram(&[f64::NAN], 30).is_empty());
        assert!(histogram(&[1.0, 2.0], 0).is_empty());
        assert_eq!(max_count(&[]), 0);
    }
}
