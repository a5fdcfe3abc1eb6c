//! Report output.
//!
//! - [`ConsoleSummary`] renders the human-readable statistics printed by
//!   default.
//! - [`ReportGenerator`] serializes the full [`AnalysisReport`] as JSON, for
//!   stdout (`--json`) or a file (`--emit-report`).
//!
//! # Example
//!
//! ```rust,ignore
//! use cardio_audit::reporting::{ReportGenerator, print_report, report_base_name};
//!
//! print_report(&report);
//!
//! let generator = ReportGenerator::new("output");
//! generator.write_report_to_file(&report, &report_base_name(&config.input_path))?;
//! ```
//!
//! [`AnalysisReport`]: crate::types::AnalysisReport

mod console;
mod generator;

pub use console::{ConsoleSummary, print_report};
pub use generator::{ReportGenerator, report_base_name};
