//! Statistical functions behind the column summaries.

use crate::error::Result;
use crate::types::{DescriptiveStats, NumericSummary, ValueCount};
use crate::utils::string_values;
use polars::prelude::*;

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
///
/// Returns 0.0 for fewer than two values.
pub fn calculate_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Quantile of already sorted values using linear interpolation between
/// the two closest ranks (position `p * (n - 1)`).
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Build the describe-style summary of a column's non-null values.
///
/// A column without non-null values gets a count of 0 and no statistics.
pub fn numeric_summary(column: &str, values: &[Option<f64>]) -> NumericSummary {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(|a, b| a.total_cmp(b));

    NumericSummary {
        column: column.to_string(),
        count: present.len(),
        stats: descriptive_stats(&present),
    }
}

fn descriptive_stats(sorted: &[f64]) -> Option<DescriptiveStats> {
    Some(DescriptiveStats {
        mean: mean(sorted)?,
        std: calculate_std(sorted),
        min: *sorted.first()?,
        q25: quantile_sorted(sorted, 0.25)?,
        median: quantile_sorted(sorted, 0.5)?,
        q75: quantile_sorted(sorted, 0.75)?,
        max: *sorted.last()?,
    })
}

/// Pearson correlation over pairwise-complete observations.
///
/// Returns `None` with fewer than two complete pairs or when either side
/// has zero variance.
pub fn pearson_correlation(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Frequency of each distinct non-null value, most frequent first.
///
/// Ties are ordered by value so output is deterministic.
pub fn value_counts(series: &Series) -> Result<Vec<ValueCount>> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Ok(Vec::new());
    }

    let counts_df = non_null.value_counts(true, false, "count".into(), false)?;
    let values = string_values(counts_df.column(non_null.name())?.as_materialized_series())?;
    let counts_series = counts_df
        .column("count")?
        .as_materialized_series()
        .cast(&DataType::UInt64)?;
    let counts = counts_series.u64()?;

    let mut result: Vec<ValueCount> = values
        .into_iter()
        .zip(counts.into_iter())
        .filter_map(|(value, count)| {
            Some(ValueCount {
                value: value?,
                count: count? as usize,
            })
        })
        .collect();

    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    Ok(result)
}
