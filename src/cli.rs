//! CLI argument parsing for Cotejar

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for comparison reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cotejar")]
#[command(version)]
#[command(
    about = "Paired A/B significance comparison for task benchmark results",
    long_about = None
)]
pub struct Cli {
    /// JSON file with system A's trial results
    #[arg(value_name = "RESULTS_A")]
    pub results_a: PathBuf,

    /// JSON file with system B's trial results
    #[arg(value_name = "RESULTS_B")]
    pub results_b: PathBuf,

    /// Metric to compare with a paired t-test and effect size (repeatable)
    #[arg(short = 'm', long = "metric", value_name = "NAME")]
    pub metrics: Vec<String>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
