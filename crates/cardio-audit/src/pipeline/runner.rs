//! The end-to-end audit run.
//!
//! [`AnalysisRunner::run`] performs, in order: load, column check, describe,
//! categorical/numeric summaries, sensitive-attribute analysis and figure,
//! cleaning, and the before/after figure. Any error aborts the run; the
//! caller decides whether it was recoverable.

use crate::charts::{render_cleaning_impact, render_sensitive_attributes};
use crate::cleaner::DataCleaner;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result, ResultExt};
use crate::loader::load_table;
use crate::pipeline::progress::{
    AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::profiler::DataProfiler;
use crate::sensitive::SensitiveAttributeAnalyzer;
use crate::types::{AnalysisReport, ChartArtifacts};
use crate::utils::require_columns;
use chrono::Local;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runs the audit for one input table.
pub struct AnalysisRunner {
    config: AnalysisConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(AnalysisRunner: Send, Sync);

impl AnalysisRunner {
    pub fn builder() -> AnalysisRunnerBuilder {
        AnalysisRunnerBuilder::default()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every stage and return the collected report.
    ///
    /// Emits a `Complete` update on success and a `Failed` update on error.
    /// Stage transitions and errors are left to the caller to log, through
    /// the progress reporter and the returned error.
    pub fn run(&self) -> Result<AnalysisReport> {
        match self.run_internal() {
            Ok(report) => {
                self.report_progress(ProgressUpdate::complete("Analysis completed successfully"));
                Ok(report)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn stage(&self, stage: AnalysisStage) {
        self.report_progress(ProgressUpdate::started(stage));
    }

    fn run_internal(&self) -> Result<AnalysisReport> {
        let start_time = Instant::now();
        let config = &self.config;

        self.stage(AnalysisStage::Loading);
        let df = load_table(&config.input_path)?;
        info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            config.input_path.display()
        );
        require_columns(&df, &config.required_columns())
            .context("Checking columns required for cleaning")?;

        self.stage(AnalysisStage::Describing);
        let overview = DataProfiler::describe(&df).context("Describing dataset")?;

        self.stage(AnalysisStage::Summarizing);
        let categorical = DataProfiler::categorical_summaries(&df)?;
        let numeric = DataProfiler::numeric_summaries(&df)?;
        debug!(
            "Summarized {} categorical and {} numeric columns",
            categorical.len(),
            numeric.len()
        );

        self.stage(AnalysisStage::SensitiveAnalysis);
        let sensitive = SensitiveAttributeAnalyzer::analyze(&df, config)
            .context("Analyzing sensitive attributes")?;

        self.stage(AnalysisStage::SensitiveCharts);
        let sensitive_chart = render_sensitive_attributes(&df, config)?;

        self.stage(AnalysisStage::Cleaning);
        let (cleaned, cleaning) =
            DataCleaner::remove_impossible_values(&df, &config.cleaning_columns)
                .context("Removing impossible values")?;

        self.stage(AnalysisStage::CleaningCharts);
        let cleaning_chart = render_cleaning_impact(&df, &cleaned, config)?;

        info!(
            "Analysis finished in {} ms",
            start_time.elapsed().as_millis()
        );

        Ok(AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: config.input_path.display().to_string(),
            overview,
            categorical,
            numeric,
            sensitive,
            cleaning,
            charts: ChartArtifacts {
                sensitive_attributes: Some(sensitive_chart),
                cleaning_impact: Some(cleaning_chart),
            },
        })
    }
}

/// Builder for [`AnalysisRunner`].
#[derive(Default)]
pub struct AnalysisRunnerBuilder {
    config: Option<AnalysisConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(AnalysisRunnerBuilder: Send);

impl AnalysisRunnerBuilder {
    /// Set the run configuration. Defaults to [`AnalysisConfig::default()`].
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during the run.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the runner, validating the configuration.
    pub fn build(self) -> Result<AnalysisRunner> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;

        Ok(AnalysisRunner {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
