//! Configuration types for the audit run.
//!
//! Every field has a default matching the standard `heart.csv` layout, so
//! `AnalysisConfig::default()` reproduces the fixed behaviour of the tool.
//! The builder exists for tests and for the CLI overrides.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default input table, relative to the working directory.
pub const DEFAULT_INPUT: &str = "heart.csv";
/// Default file name of the sensitive-attribute figure.
pub const SENSITIVE_CHART_FILE: &str = "analisis_variables_sensibles.png";
/// Default file name of the cleaning-impact figure.
pub const CLEANING_CHART_FILE: &str = "impacto_limpieza_datos.png";

/// Raster settings shared by both figures.
///
/// Figure sizes are expressed in inches and converted to pixels with
/// [`ChartSettings::pixel_size`]. Font sizes elsewhere are given in points
/// and scaled with [`ChartSettings::font_px`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Dots per inch. Default: 300
    pub dpi: u32,
    /// Figure width in inches. Default: 15.0
    pub width_in: f64,
    /// Figure height in inches. Default: 5.0
    pub height_in: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            dpi: 300,
            width_in: 15.0,
            height_in: 5.0,
        }
    }
}

impl ChartSettings {
    /// Figure size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Convert a point size to pixels at the configured DPI.
    pub fn font_px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }
}

/// Configuration for an audit run.
///
/// Use [`AnalysisConfig::builder()`] to override individual fields.
///
/// # Example
///
/// ```rust,ignore
/// use cardio_audit::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .input_path("data/heart.csv")
///     .output_dir("charts")
///     .histogram_bins(20)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Path of the delimited-text table to analyze.
    /// Default: "heart.csv"
    pub input_path: PathBuf,

    /// Directory the figures (and optional report) are written to.
    /// Default: "."
    pub output_dir: PathBuf,

    /// Categorical sensitive attribute.
    /// Default: "Sex"
    pub categorical_sensitive_column: String,

    /// Numeric sensitive attribute.
    /// Default: "Age"
    pub numeric_sensitive_column: String,

    /// Binary outcome column the sensitive attributes are compared against.
    /// Default: "HeartDisease"
    pub outcome_column: String,

    /// Columns where a zero value is physiologically impossible.
    /// Rows with a zero in any of them are removed.
    /// Default: ["RestingBP", "Cholesterol"]
    pub cleaning_columns: Vec<String>,

    /// Column whose distribution is compared before and after cleaning.
    /// Default: "RestingBP"
    pub histogram_column: String,

    /// Number of equal-width histogram bins.
    /// Default: 30
    pub histogram_bins: usize,

    /// Raster settings for both figures.
    pub chart: ChartSettings,

    /// File name of the sensitive-attribute figure.
    /// Default: "analisis_variables_sensibles.png"
    pub sensitive_chart_file: String,

    /// File name of the cleaning-impact figure.
    /// Default: "impacto_limpieza_datos.png"
    pub cleaning_chart_file: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            categorical_sensitive_column: "Sex".to_string(),
            numeric_sensitive_column: "Age".to_string(),
            outcome_column: "HeartDisease".to_string(),
            cleaning_columns: vec!["RestingBP".to_string(), "Cholesterol".to_string()],
            histogram_column: "RestingBP".to_string(),
            histogram_bins: 30,
            chart: ChartSettings::default(),
            sensitive_chart_file: SENSITIVE_CHART_FILE.to_string(),
            cleaning_chart_file: CLEANING_CHART_FILE.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Full path of the sensitive-attribute figure.
    pub fn sensitive_chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.sensitive_chart_file)
    }

    /// Full path of the cleaning-impact figure.
    pub fn cleaning_chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaning_chart_file)
    }

    /// Columns that must exist before any output is produced.
    ///
    /// The cleaning step and the before/after histogram cannot be skipped,
    /// so their columns are checked up front.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut required: Vec<&str> = self.cleaning_columns.iter().map(String::as_str).collect();
        if !required.contains(&self.histogram_column.as_str()) {
            required.push(&self.histogram_column);
        }
        required
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidBins(self.histogram_bins));
        }

        if self.chart.dpi == 0 {
            return Err(ConfigValidationError::InvalidDpi(self.chart.dpi));
        }

        if !(self.chart.width_in > 0.0 && self.chart.height_in > 0.0) {
            return Err(ConfigValidationError::InvalidFigureSize {
                width: self.chart.width_in,
                height: self.chart.height_in,
            });
        }

        if self.cleaning_columns.is_empty() {
            return Err(ConfigValidationError::NoCleaningColumns);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid histogram bins: {0} (must be at least 1)")]
    InvalidBins(usize),

    #[error("Invalid DPI: {0} (must be at least 1)")]
    InvalidDpi(u32),

    #[error("Invalid figure size: {width}x{height} inches (both must be positive)")]
    InvalidFigureSize { width: f64, height: f64 },

    #[error("At least one cleaning column is required")]
    NoCleaningColumns,
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    categorical_sensitive_column: Option<String>,
    numeric_sensitive_column: Option<String>,
    outcome_column: Option<String>,
    cleaning_columns: Option<Vec<String>>,
    histogram_column: Option<String>,
    histogram_bins: Option<usize>,
    dpi: Option<u32>,
    figure_size: Option<(f64, f64)>,
}

impl AnalysisConfigBuilder {
    /// Set the path of the input table.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the directory charts are written to.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the categorical sensitive attribute.
    pub fn categorical_sensitive_column(mut self, column: impl Into<String>) -> Self {
        self.categorical_sensitive_column = Some(column.into());
        self
    }

    /// Set the numeric sensitive attribute.
    pub fn numeric_sensitive_column(mut self, column: impl Into<String>) -> Self {
        self.numeric_sensitive_column = Some(column.into());
        self
    }

    /// Set the outcome column.
    pub fn outcome_column(mut self, column: impl Into<String>) -> Self {
        self.outcome_column = Some(column.into());
        self
    }

    /// Set the columns in which a zero marks an impossible row.
    pub fn cleaning_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cleaning_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the column compared before and after cleaning.
    pub fn histogram_column(mut self, column: impl Into<String>) -> Self {
        self.histogram_column = Some(column.into());
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the raster resolution of both figures.
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// Set the figure size in inches.
    pub fn figure_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.figure_size = Some((width_in, height_in));
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let (width_in, height_in) = self
            .figure_size
            .unwrap_or((defaults.chart.width_in, defaults.chart.height_in));

        let config = AnalysisConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            categorical_sensitive_column: self
                .categorical_sensitive_column
                .unwrap_or(defaults.categorical_sensitive_column),
            numeric_sensitive_column: self
                .numeric_sensitive_column
                .unwrap_or(defaults.numeric_sensitive_column),
            outcome_column: self.outcome_column.unwrap_or(defaults.outcome_column),
            cleaning_columns: self.cleaning_columns.unwrap_or(defaults.cleaning_columns),
            histogram_column: self.histogram_column.unwrap_or(defaults.histogram_column),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            chart: ChartSettings {
                dpi: self.dpi.unwrap_or(defaults.chart.dpi),
                width_in,
                height_in,
            },
            sensitive_chart_file: defaults.sensitive_chart_file,
            cleaning_chart_file: defaults.cleaning_chart_file,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_path, PathBuf::from("heart.csv"));
        assert_eq!(config.categorical_sensitive_column, "Sex");
        assert_eq!(config.numeric_sensitive_column, "Age");
        assert_eq!(config.outcome_column, "HeartDisease");
        assert_eq!(config.cleaning_columns, vec!["RestingBP", "Cholesterol"]);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.chart.dpi, 300);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = AnalysisConfig::builder().build().unwrap();
        let default = AnalysisConfig::default();
        assert_eq!(config.input_path, default.input_path);
        assert_eq!(config.histogram_bins, default.histogram_bins);
        assert_eq!(config.chart, default.chart);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .input_path("data/cardio.csv")
            .output_dir("charts")
            .cleaning_columns(["RestingBP"])
            .histogram_bins(10)
            .dpi(100)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("data/cardio.csv"));
        assert_eq!(config.cleaning_columns, vec!["RestingBP"]);
        assert_eq!(config.histogram_bins, 10);
        assert_eq!(config.chart.dpi, 100);
        assert_eq!(
            config.sensitive_chart_path(),
            PathBuf::from("charts").join("analisis_variables_sensibles.png")
        );
    }

    #[test]
    fn test_pixel_size_at_300_dpi() {
        let settings = ChartSettings::default();
        assert_eq!(settings.pixel_size(), (4500, 1500));
        assert!((settings.font_px(12.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_required_columns_deduplicates_histogram_column() {
        let config = AnalysisConfig::default();
        assert_eq!(config.required_columns(), vec!["RestingBP", "Cholesterol"]);

        let config = AnalysisConfig::builder()
            .histogram_column("MaxHR")
            .build()
            .unwrap();
        assert_eq!(
            config.required_columns(),
            vec!["RestingBP", "Cholesterol", "MaxHR"]
        );
    }

    #[test]
    fn test_validation_zero_bins() {
        let result = AnalysisConfig::builder().histogram_bins(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidBins(0)
        ));
    }

    #[test]
    fn test_validation_zero_dpi() {
        let result = AnalysisConfig::builder().dpi(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidDpi(0)
        ));
    }

    #[test]
    fn test_validation_empty_cleaning_columns() {
        let result = AnalysisConfig::builder()
            .cleaning_columns(Vec::<String>::new())
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::NoCleaningColumns
        ));
    }

    #[test]
    fn test_validation_negative_figure_size() {
        let result = AnalysisConfig::builder().figure_size(-1.0, 5.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidFigureSize { .. }
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AnalysisConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.outcome_column, deserialized.outcome_column);
        assert_eq!(config.cleaning_columns, deserialized.cleaning_columns);
        assert_eq!(config.chart, deserialized.chart);
    }
}
