//! Heart Dataset Audit Library
//!
//! Descriptive statistics, sensitive-attribute analysis and impossible-value
//! cleaning for the `heart.csv` cardiovascular dataset, built on Polars and
//! Plotters.
//!
//! # Overview
//!
//! A run performs, in order:
//!
//! - **Load**: read the delimited-text table into a `DataFrame`
//! - **Describe**: shape, dtypes, null counts, duplicate rows, memory
//! - **Summarize**: value counts of text columns, describe-style statistics
//!   of numeric columns
//! - **Sensitive Attributes**: `Sex` and `Age` against `HeartDisease`, with a
//!   two-panel figure
//! - **Cleaning**: drop rows where `RestingBP` or `Cholesterol` is zero, with
//!   a before/after histogram figure
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cardio_audit::{AnalysisConfig, AnalysisRunner};
//! use cardio_audit::reporting::print_report;
//!
//! let config = AnalysisConfig::builder()
//!     .input_path("heart.csv")
//!     .output_dir("charts")
//!     .build()?;
//!
//! let report = AnalysisRunner::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//!
//! print_report(&report);
//! ```
//!
//! # Using the steps directly
//!
//! Every step is a plain function over a `DataFrame`:
//!
//! ```rust,ignore
//! use cardio_audit::{DataCleaner, DataProfiler, load_table};
//!
//! let df = load_table("heart.csv".as_ref())?;
//! let overview = DataProfiler::describe(&df)?;
//! let (cleaned, report) = DataCleaner::remove_impossible_values(
//!     &df,
//!     &["RestingBP".to_string(), "Cholesterol".to_string()],
//! )?;
//! println!("{:.1}% retained", report.retained_percentage);
//! ```
//!
//! # Missing input
//!
//! A missing input file is the one recoverable failure: [`AnalysisRunner::run`]
//! returns [`AnalysisError::InputNotFound`] before anything is written, and
//! [`AnalysisError::is_recoverable`] tells the caller it may exit cleanly.

pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod sensitive;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use charts::{render_cleaning_impact, render_sensitive_attributes};
pub use cleaner::DataCleaner;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ChartSettings, ConfigValidationError};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use loader::load_table;
pub use pipeline::{
    AnalysisRunner, AnalysisRunnerBuilder, AnalysisStage, ClosureProgressReporter,
    ProgressReporter, ProgressUpdate,
};
pub use profiler::{DataProfiler, pearson_correlation};
pub use reporting::{ConsoleSummary, ReportGenerator};
pub use sensitive::SensitiveAttributeAnalyzer;
pub use types::{
    AnalysisReport, CategoricalSummary, ChartArtifacts, CleaningReport, DatasetOverview,
    DescriptiveStats, NumericSummary, SensitiveAttributeReport, SensitiveKind,
};
pub use utils::{DtypeCategory, get_dtype_category, is_numeric_dtype};
