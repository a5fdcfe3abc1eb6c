//! CLI entry point for the heart dataset audit.

use anyhow::{Result, anyhow};
use cardio_audit::reporting::{ReportGenerator, print_report, report_base_name};
use cardio_audit::{AnalysisConfig, AnalysisError, AnalysisReport, AnalysisRunner};
use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Heart dataset audit: statistics, sensitive attributes and cleaning",
    long_about = "Profiles a heart disease table, analyzes Sex and Age against HeartDisease,\n\
                  removes rows with RestingBP or Cholesterol equal to zero and renders two\n\
                  PNG figures.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RUST_LOG    Log filter, overrides --log-level (may be set in .env)\n\n\
                  EXAMPLES:\n  \
                  # Analyze heart.csv in the current directory\n  \
                  cardio-audit\n\n  \
                  # Write figures and a JSON report to charts/\n  \
                  cardio-audit -i data/heart.csv -o charts/ --emit-report\n\n  \
                  # Machine-readable output only\n  \
                  cardio-audit --json | jq .cleaning"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long, default_value = cardio_audit::config::DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory the figures are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the summary)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of the human-readable summary
    ///
    /// Disables all logs; only the final JSON report is written.
    #[arg(long)]
    json: bool,

    /// Write the JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Resolution of both figures
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// Number of histogram bins in the cleaning figure
    #[arg(long, default_value_t = 30)]
    bins: usize,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // .env first so RUST_LOG from it reaches the filter
    dotenv().ok();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = AnalysisConfig::builder()
        .input_path(&args.input)
        .output_dir(&args.output_dir)
        .dpi(args.dpi)
        .histogram_bins(args.bins)
        .build()?;

    let mut builder = AnalysisRunner::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }
    let runner = builder.build()?;

    match runner.run() {
        Ok(report) => handle_output(&report, &args),
        Err(e) if e.is_recoverable() => {
            report_missing_input(&e, &args)?;
            Ok(())
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            Err(anyhow!("Analysis failed: {}", e))
        }
    }
}

/// Output behavior:
/// - Default: print the human-readable summary to stdout
/// - `--json`: print JSON to stdout only (no logs)
/// - `--emit-report`: also write the JSON report to a file
fn handle_output(report: &AnalysisReport, args: &Args) -> Result<()> {
    if args.emit_report {
        let generator = ReportGenerator::new(&args.output_dir);
        generator.write_report_to_file(report, &report_base_name(&args.input))?;
    }

    if args.json {
        println!("{}", ReportGenerator::to_json(report)?);
        return Ok(());
    }

    print_report(report);
    Ok(())
}

/// Tell the user where the table was expected. No figure has been written
/// at this point.
fn report_missing_input(err: &AnalysisError, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(err)?);
        return Ok(());
    }

    println!("{}", err);
    println!(
        "Place the dataset at '{}' or pass its location with --input <PATH>.",
        args.input.display()
    );
    Ok(())
}
