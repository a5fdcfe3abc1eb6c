//! Pipeline module.
//!
//! This module provides the audit runner and its progress reporting.

pub mod progress;
mod runner;

pub use progress::{AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};
pub use runner::{AnalysisRunner, AnalysisRunnerBuilder};
