//! Human-readable console output of an [`AnalysisReport`].

use crate::types::{
    AnalysisReport, CategoricalSummary, CleaningReport, DatasetOverview, NumericSummary,
    SensitiveAttributeReport, SensitiveKind,
};
use std::fmt;

const RULE_WIDTH: usize = 80;
const SECTION_WIDTH: usize = 40;

/// Display adapter that renders a report as the console summary.
///
/// ```rust,ignore
/// print!("{}", ConsoleSummary(&report));
/// ```
pub struct ConsoleSummary<'a>(pub &'a AnalysisReport);

impl fmt::Display for ConsoleSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "HEART DATASET AUDIT: {}", report.input_file)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f)?;

        write_overview(f, &report.overview)?;
        write_categorical(f, &report.categorical)?;
        write_numeric(f, &report.numeric)?;
        write_sensitive(f, &report.sensitive)?;
        write_cleaning(f, &report.cleaning)?;

        let charts = report.charts.paths();
        if !charts.is_empty() {
            section(f, "CHARTS")?;
            for path in charts {
                writeln!(f, "  - {}", path.display())?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}

/// Print the console summary to stdout.
pub fn print_report(report: &AnalysisReport) {
    print!("{}", ConsoleSummary(report));
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(SECTION_WIDTH))
}

fn write_overview(f: &mut fmt::Formatter<'_>, overview: &DatasetOverview) -> fmt::Result {
    section(f, "DATASET OVERVIEW")?;
    writeln!(
        f,
        "Shape: {} rows x {} columns",
        overview.shape.0, overview.shape.1
    )?;
    writeln!(f, "Columns: {}", overview.column_names().join(", "))?;
    writeln!(f)?;

    writeln!(f, "{:<20} {:<12} {:>8}", "Column", "Type", "Nulls")?;
    for col in &overview.columns {
        writeln!(f, "{:<20} {:<12} {:>8}", col.name, col.dtype, col.null_count)?;
    }
    writeln!(f)?;

    writeln!(f, "Total null values: {}", overview.total_nulls())?;
    writeln!(f, "Duplicate rows: {}", overview.duplicate_count)?;
    writeln!(f, "Memory usage: {:.2} MB", overview.memory_mb)?;
    writeln!(f)
}

fn write_categorical(f: &mut fmt::Formatter<'_>, summaries: &[CategoricalSummary]) -> fmt::Result {
    section(f, "CATEGORICAL COLUMNS")?;
    if summaries.is_empty() {
        writeln!(f, "  (none)")?;
    }
    for summary in summaries {
        writeln!(f, "{}:", summary.column)?;
        for vc in &summary.value_counts {
            writeln!(f, "  {:<16} {:>8}", vc.value, vc.count)?;
        }
    }
    writeln!(f)
}

fn write_numeric(f: &mut fmt::Formatter<'_>, summaries: &[NumericSummary]) -> fmt::Result {
    section(f, "NUMERIC COLUMNS")?;
    if summaries.is_empty() {
        writeln!(f, "  (none)")?;
        return writeln!(f);
    }

    writeln!(
        f,
        "{:<14} {:>7} {:>10} {:>10} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    )?;
    for s in summaries {
        match &s.stats {
            Some(st) => writeln!(
                f,
                "{:<14} {:>7} {:>10.3} {:>10.3} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
                s.column, s.count, st.mean, st.std, st.min, st.q25, st.median, st.q75, st.max
            )?,
            None => writeln!(f, "{:<14} {:>7} {:>10}", s.column, s.count, "n/a")?,
        }
    }
    writeln!(f)
}

fn write_sensitive(
    f: &mut fmt::Formatter<'_>,
    reports: &[SensitiveAttributeReport],
) -> fmt::Result {
    section(f, "SENSITIVE ATTRIBUTES")?;
    if reports.is_empty() {
        writeln!(f, "  (no sensitive attribute found)")?;
    }

    for report in reports {
        match &report.kind {
            SensitiveKind::Categorical {
                distribution,
                outcome_rate_by_category,
            } => {
                writeln!(f, "{} distribution:", report.column)?;
                for vc in distribution {
                    writeln!(f, "  {:<16} {:>8}", vc.value, vc.count)?;
                }
                if let Some(rates) = outcome_rate_by_category {
                    writeln!(f, "Outcome rate by {}:", report.column)?;
                    for rate in rates {
                        writeln!(f, "  {:<16} {:>8.3}", rate.category, rate.rate)?;
                    }
                }
            }
            SensitiveKind::Numeric {
                min,
                max,
                mean,
                outcome_correlation,
            } => {
                writeln!(f, "{} range: {} - {}", report.column, min, max)?;
                writeln!(f, "{} mean: {:.3}", report.column, mean)?;
                match outcome_correlation {
                    Some(r) => writeln!(f, "Correlation with outcome: {:.3}", r)?,
                    None => writeln!(f, "Correlation with outcome: n/a")?,
                }
            }
        }
    }
    writeln!(f)
}

fn write_cleaning(f: &mut fmt::Formatter<'_>, cleaning: &CleaningReport) -> fmt::Result {
    section(f, "DATA CLEANING")?;
    for zc in &cleaning.zero_counts {
        writeln!(f, "Rows with {} = 0: {}", zc.column, zc.rows)?;
    }
    writeln!(
        f,
        "Rows: {} -> {} ({} columns)",
        cleaning.initial_rows, cleaning.final_rows, cleaning.columns
    )?;
    writeln!(
        f,
        "Removed {} rows, {:.1}% of the data retained",
        cleaning.removed_count, cleaning.retained_percentage
    )?;
    for min in &cleaning.post_minimums {
        match min.min {
            Some(value) => writeln!(f, "Minimum {} after cleaning: {}", min.column, value)?,
            None => writeln!(f, "Minimum {} after cleaning: n/a", min.column)?,
        }
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CategoryRate, ChartArtifacts, ColumnMinimum, ColumnOverview, DescriptiveStats, ValueCount,
        ZeroCount,
    };
    use crate::utils::DtypeCategory;
    use std::path::PathBuf;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            generated_at: "2026-01-01 00:00:00".to_string(),
            input_file: "heart.csv".to_string(),
            overview: DatasetOverview {
                shape: (4, 2),
                columns: vec![
                    ColumnOverview {
                        name: "Sex".to_string(),
                        dtype: "str".to_string(),
                        category: DtypeCategory::String,
                        null_count: 0,
                    },
                    ColumnOverview {
                        name: "RestingBP".to_string(),
                        dtype: "i64".to_string(),
                        category: DtypeCategory::Numeric,
                        null_count: 1,
                    },
                ],
                duplicate_count: 0,
                memory_mb: 0.000123,
            },
            categorical: vec![CategoricalSummary {
                column: "Sex".to_string(),
                value_counts: vec![ValueCount {
                    value: "M".to_string(),
                    count: 3,
                }],
            }],
            numeric: vec![
                NumericSummary {
                    column: "RestingBP".to_string(),
                    count: 3,
                    stats: Some(DescriptiveStats {
                        mean: 140.0,
                        std: 20.0,
                        min: 120.0,
                        q25: 130.0,
                        median: 140.0,
                        q75: 150.0,
                        max: 160.0,
                    }),
                },
                NumericSummary {
                    column: "Oldpeak".to_string(),
                    count: 0,
                    stats: None,
                },
            ],
            sensitive: vec![
                SensitiveAttributeReport {
                    column: "Sex".to_string(),
                    kind: SensitiveKind::Categorical {
                        distribution: vec![ValueCount {
                            value: "M".to_string(),
                            count: 3,
                        }],
                        outcome_rate_by_category: Some(vec![CategoryRate {
                            category: "M".to_string(),
                            rate: 0.667,
                        }]),
                    },
                },
                SensitiveAttributeReport {
                    column: "Age".to_string(),
                    kind: SensitiveKind::Numeric {
                        min: 37.0,
                        max: 54.0,
                        mean: 45.6,
                        outcome_correlation: None,
                    },
                },
            ],
            cleaning: CleaningReport {
                initial_rows: 3,
                final_rows: 2,
                columns: 2,
                zero_counts: vec![ZeroCount {
                    column: "RestingBP".to_string(),
                    rows: 1,
                }],
                removed_count: 1,
                retained_percentage: 200.0 / 3.0,
                post_minimums: vec![ColumnMinimum {
                    column: "RestingBP".to_string(),
                    min: Some(120.0),
                }],
            },
            charts: ChartArtifacts {
                sensitive_attributes: Some(PathBuf::from("out/analisis_variables_sensibles.png")),
                cleaning_impact: None,
            },
        }
    }

    // ==================== console summary tests ====================

    #[test]
    fn test_overview_section() {
        let text = ConsoleSummary(&sample_report()).to_string();
        assert!(text.contains("Shape: 4 rows x 2 columns"));
        assert!(text.contains("Columns: Sex, RestingBP"));
        assert!(text.contains("Memory usage: 0.00 MB"));
        assert!(text.contains("Total null values: 1"));
    }

    #[test]
    fn test_numeric_section_marks_empty_columns() {
        let text = ConsoleSummary(&sample_report()).to_string();
        assert!(text.contains("RestingBP            3    140.000     20.000"));
        assert!(text.contains("Oldpeak              0        n/a"));
    }

    #[test]
    fn test_cleaning_percentage_one_decimal() {
        let text = ConsoleSummary(&sample_report()).to_string();
        assert!(text.contains("Removed 1 rows, 66.7% of the data retained"));
        assert!(text.contains("Rows with RestingBP = 0: 1"));
        assert!(text.contains("Minimum RestingBP after cleaning: 120"));
    }

    #[test]
    fn test_sensitive_section() {
        let text = ConsoleSummary(&sample_report()).to_string();
        assert!(text.contains("Outcome rate by Sex:"));
        assert!(text.contains("0.667"));
        assert!(text.contains("Age range: 37 - 54"));
        assert!(text.contains("Age mean: 45.600"));
        assert!(text.contains("Correlation with outcome: n/a"));
    }

    #[test]
    fn test_lists_only_written_charts() {
        let text = ConsoleSummary(&sample_report()).to_string();
        assert!(text.contains("out/analisis_variables_sensibles.png"));
        assert!(!text.contains("impacto_limpieza_datos.png"));
    }
}
