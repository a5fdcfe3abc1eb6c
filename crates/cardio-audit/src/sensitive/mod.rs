//! Sensitive-attribute analysis.
//!
//! Demographic columns are inspected against the outcome to surface
//! potential bias in the dataset. Each attribute is treated according to
//! its dtype: text columns get a distribution and a per-category outcome
//! rate, numeric columns get a range, a mean and a correlation with the
//! outcome.

mod crosstab;

pub use crosstab::{
    Crosstab, crosstab_normalized, distinct_outcomes, group_values_by_outcome,
    outcome_rate_by_category,
};

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::profiler::{mean, pearson_correlation, value_counts};
use crate::types::{SensitiveAttributeReport, SensitiveKind};
use crate::utils::{DtypeCategory, get_dtype_category, numeric_values, round_to, string_values};
use polars::prelude::*;
use tracing::{debug, warn};

pub struct SensitiveAttributeAnalyzer;

impl SensitiveAttributeAnalyzer {
    /// Analyze the configured sensitive attributes.
    ///
    /// Attributes absent from the table are skipped with a warning. Outcome
    /// statistics are only computed when the outcome column exists.
    pub fn analyze(df: &DataFrame, config: &AnalysisConfig) -> Result<Vec<SensitiveAttributeReport>> {
        let outcome = match df.column(&config.outcome_column) {
            Ok(col) => Some(numeric_values(col.as_materialized_series())?),
            Err(_) => {
                warn!(
                    "Outcome column '{}' not found, skipping outcome statistics",
                    config.outcome_column
                );
                None
            }
        };

        let mut reports = Vec::with_capacity(2);
        for name in [
            &config.categorical_sensitive_column,
            &config.numeric_sensitive_column,
        ] {
            let Ok(col) = df.column(name) else {
                warn!("Sensitive attribute '{}' not found, skipping", name);
                continue;
            };
            let series = col.as_materialized_series();
            reports.push(Self::analyze_column(series, outcome.as_deref())?);
        }

        Ok(reports)
    }

    /// Analyze one attribute, dispatching on its dtype.
    pub fn analyze_column(
        series: &Series,
        outcome: Option<&[Option<f64>]>,
    ) -> Result<SensitiveAttributeReport> {
        let name = series.name().to_string();
        let kind = match get_dtype_category(series.dtype()) {
            DtypeCategory::Numeric => Self::numeric_kind(series, outcome)?,
            _ => Self::categorical_kind(series, outcome)?,
        };
        debug!("Analyzed sensitive attribute '{}'", name);
        Ok(SensitiveAttributeReport { column: name, kind })
    }

    fn categorical_kind(series: &Series, outcome: Option<&[Option<f64>]>) -> Result<SensitiveKind> {
        let distribution = value_counts(series)?;
        let outcome_rate_by_category = match outcome {
            Some(outcome) => Some(outcome_rate_by_category(&string_values(series)?, outcome)),
            None => None,
        };
        Ok(SensitiveKind::Categorical {
            distribution,
            outcome_rate_by_category,
        })
    }

    fn numeric_kind(series: &Series, outcome: Option<&[Option<f64>]>) -> Result<SensitiveKind> {
        let values = numeric_values(series)?;
        let present: Vec<f64> = values.iter().flatten().copied().collect();

        let (Some(min), Some(max), Some(average)) = (
            present.iter().copied().min_by(|a, b| a.total_cmp(b)),
            present.iter().copied().max_by(|a, b| a.total_cmp(b)),
            mean(&present),
        ) else {
            return Err(AnalysisError::NoValidValues(series.name().to_string()));
        };

        let outcome_correlation = outcome
            .and_then(|outcome| pearson_correlation(&values, outcome))
            .map(|r| round_to(r, 3));

        Ok(SensitiveKind::Numeric {
            min,
            max,
            mean: average,
            outcome_correlation,
        })
    }
}
