use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::DtypeCategory;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnOverview {
    pub name: String,
    pub dtype: String,
    pub category: DtypeCategory,
    pub null_count: usize,
}

/// Shape, types and quality audit of a loaded table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetOverview {
    /// (rows, columns)
    pub shape: (usize, usize),
    pub columns: Vec<ColumnOverview>,
    pub duplicate_count: usize,
    /// Estimated in-memory size in megabytes.
    pub memory_mb: f64,
}

impl DatasetOverview {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn total_nulls(&self) -> usize {
        self.columns.iter().map(|c| c.null_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Frequency table of a text column, most frequent value first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub value_counts: Vec<ValueCount>,
}

/// Describe-style statistics of a numeric column over its non-null values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    /// `None` when the column holds no non-null value.
    #[serde(flatten)]
    pub stats: Option<DescriptiveStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRate {
    pub category: String,
    /// Mean of the outcome over rows of this category, rounded to 3 decimals.
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensitiveKind {
    Categorical {
        distribution: Vec<ValueCount>,
        /// `None` when the outcome column is absent.
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome_rate_by_category: Option<Vec<CategoryRate>>,
    },
    Numeric {
        min: f64,
        max: f64,
        mean: f64,
        /// Pearson correlation with the outcome, rounded to 3 decimals.
        /// `None` when the outcome column is absent or the correlation is
        /// undefined.
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome_correlation: Option<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitiveAttributeReport {
    pub column: String,
    #[serde(flatten)]
    pub kind: SensitiveKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroCount {
    pub column: String,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMinimum {
    pub column: String,
    pub min: Option<f64>,
}

/// Outcome of the impossible-value removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub initial_rows: usize,
    pub final_rows: usize,
    pub columns: usize,
    /// Rows holding a zero, counted per column before removal.
    pub zero_counts: Vec<ZeroCount>,
    pub removed_count: usize,
    /// `final_rows / initial_rows * 100`, or 100 for an empty table.
    pub retained_percentage: f64,
    /// Minimum of each cleaning column after removal.
    pub post_minimums: Vec<ColumnMinimum>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartArtifacts {
    pub sensitive_attributes: Option<PathBuf>,
    pub cleaning_impact: Option<PathBuf>,
}

impl ChartArtifacts {
    pub fn paths(&self) -> Vec<&PathBuf> {
        self.sensitive_attributes
            .iter()
            .chain(self.cleaning_impact.iter())
            .collect()
    }
}

/// Everything a run computed, for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub input_file: String,
    pub overview: DatasetOverview,
    pub categorical: Vec<CategoricalSummary>,
    pub numeric: Vec<NumericSummary>,
    pub sensitive: Vec<SensitiveAttributeReport>,
    pub cleaning: CleaningReport,
    pub charts: ChartArtifacts,
}
