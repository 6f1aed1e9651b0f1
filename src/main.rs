use anyhow::{Context, Result};
use clap::Parser;
use cotejar::cli::{Cli, OutputFormat};
use cotejar::report;
use cotejar::trial::TrialResult;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load one trial-result file: a JSON array of TrialResult objects
fn load_results(path: &Path) -> Result<Vec<TrialResult>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file {}", path.display()))?;
    let results: Vec<TrialResult> = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse trial results from {}", path.display()))?;
    Ok(results)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let results_a = load_results(&args.results_a)?;
    let results_b = load_results(&args.results_b)?;

    let metric_names: Vec<&str> = args.metrics.iter().map(String::as_str).collect();
    let report = report::compare(&results_a, &results_b, &metric_names)?;

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
