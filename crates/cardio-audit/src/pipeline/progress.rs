//! Progress reporting for the audit run.
//!
//! The runner emits one [`ProgressUpdate`] when each stage starts and a
//! final `Complete` (or `Failed`) update.
//!
//! # Example
//!
//! ```rust,ignore
//! use cardio_audit::AnalysisRunner;
//!
//! let report = AnalysisRunner::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of an audit run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    /// Reading the input table
    Loading,
    /// Shape, dtypes, nulls, duplicates and memory
    Describing,
    /// Per-column categorical and numeric summaries
    Summarizing,
    /// Sensitive attributes against the outcome
    SensitiveAnalysis,
    /// Rendering the sensitive-attribute figure
    SensitiveCharts,
    /// Removing rows with impossible values
    Cleaning,
    /// Rendering the before/after figure
    CleaningCharts,
    /// Run completed successfully
    Complete,
    /// Run failed with an error
    Failed,
}

impl AnalysisStage {
    /// The stages a successful run passes through, in order.
    pub const RUN_ORDER: [AnalysisStage; 7] = [
        Self::Loading,
        Self::Describing,
        Self::Summarizing,
        Self::SensitiveAnalysis,
        Self::SensitiveCharts,
        Self::Cleaning,
        Self::CleaningCharts,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Dataset",
            Self::Describing => "Describing Dataset",
            Self::Summarizing => "Summarizing Columns",
            Self::SensitiveAnalysis => "Analyzing Sensitive Attributes",
            Self::SensitiveCharts => "Rendering Sensitive Attribute Chart",
            Self::Cleaning => "Cleaning Data",
            Self::CleaningCharts => "Rendering Cleaning Impact Chart",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Share of the whole run taken by this stage (0.0 - 1.0).
    ///
    /// Weights of the [`RUN_ORDER`](Self::RUN_ORDER) stages sum to 1.0.
    /// Chart rendering dominates at the default 300 DPI.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.05,
            Self::Describing => 0.10,
            Self::Summarizing => 0.10,
            Self::SensitiveAnalysis => 0.10,
            Self::SensitiveCharts => 0.25,
            Self::Cleaning => 0.10,
            Self::CleaningCharts => 0.30,
            Self::Complete => 0.0,
            Self::Failed => 0.0,
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::Describing => 0.05,
            Self::Summarizing => 0.15,
            Self::SensitiveAnalysis => 0.25,
            Self::SensitiveCharts => 0.35,
            Self::Cleaning => 0.60,
            Self::CleaningCharts => 0.70,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current stage
    pub stage: AnalysisStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Update at the given fraction of a stage.
    pub fn new(stage: AnalysisStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + stage.weight() * stage_progress.clamp(0.0, 1.0);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    /// Update announcing the start of a stage.
    pub fn started(stage: AnalysisStage) -> Self {
        Self::new(stage, 0.0, format!("{}...", stage.display_name()))
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: AnalysisStage::Complete,
            progress: 1.0,
            message: message.into(),
        }
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: AnalysisStage::Failed,
            progress: 0.0,
            message: message.into(),
        }
    }
}

/// Receiver of progress updates.
///
/// # Example
///
/// ```rust,ignore
/// use cardio_audit::{ProgressReporter, ProgressUpdate};
///
/// struct StderrReporter;
///
/// impl ProgressReporter for StderrReporter {
///     fn report(&self, update: ProgressUpdate) {
///         eprintln!("{}: {}", update.stage.display_name(), update.message);
///     }
/// }
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Called once per stage start and once at the end of the run.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
static_assertions::assert_impl_all!(AnalysisStage: Send, Sync, Copy);
