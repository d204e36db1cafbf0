//! CLI argument parsing for Cotejo

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable Markdown report (default)
    Markdown,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cotejo")]
#[command(version)]
#[command(about = "A/B test analyzer with robust statistics", long_about = None)]
pub struct Cli {
    /// Path to a CSV file with a header row containing the group and metric columns
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Name of the group column (must contain exactly 2 distinct labels)
    #[arg(short, long, value_name = "COL")]
    pub group: String,

    /// Name of the numeric metric column to test
    #[arg(short, long, value_name = "COL")]
    pub metric: String,

    /// Significance level for both tests and the confidence interval
    #[arg(long, value_name = "FLOAT", default_value = "0.05")]
    pub alpha: f64,

    /// Two-sided winsorization fraction applied to the metric (e.g. 0.01)
    #[arg(long, value_name = "FLOAT", default_value = "0.0")]
    pub winsor: f64,

    /// Number of bootstrap resamples for the lift confidence interval
    #[arg(long, value_name = "N", default_value = "3000")]
    pub bootstrap: usize,

    /// Seed the bootstrap RNG so repeated runs produce identical reports
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output format (markdown or json)
    #[arg(long = "format", value_enum, default_value = "markdown")]
    pub format: ReportFormat,

    /// Write the report to a file instead of standard output
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_required_args() {
        let cli = Cli::parse_from(["cotejo", "data.csv", "--group", "arm", "--metric", "revenue"]);
        assert_eq!(cli.input, PathBuf::from("data.csv"));
        assert_eq!(cli.group, "arm");
        assert_eq!(cli.metric, "revenue");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["cotejo", "data.csv", "-g", "arm", "-m", "revenue"]);
        assert_eq!(cli.alpha, 0.05);
        assert_eq!(cli.winsor, 0.0);
        assert_eq!(cli.bootstrap, 3000);
        assert!(cli.seed.is_none());
        assert!(cli.out.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_custom_alpha_and_winsor() {
        let cli = Cli::parse_from([
            "cotejo", "data.csv", "-g", "arm", "-m", "revenue", "--alpha", "0.01", "--winsor",
            "0.05",
        ]);
        assert_eq!(cli.alpha, 0.01);
        assert_eq!(cli.winsor, 0.05);
    }

    #[test]
    fn test_cli_bootstrap_and_seed() {
        let cli = Cli::parse_from([
            "cotejo",
            "data.csv",
            "-g",
            "arm",
            "-m",
            "revenue",
            "--bootstrap",
            "500",
            "--seed",
            "42",
        ]);
        assert_eq!(cli.bootstrap, 500);
        assert_eq!(cli.seed, Some(42));
    }

    #[test]
    fn test_cli_missing_metric_is_rejected() {
        let parsed = Cli::try_parse_from(["cotejo", "data.csv", "--group", "arm"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_out_path() {
        let cli = Cli::parse_from([
            "cotejo",
            "data.csv",
            "-g",
            "arm",
            "-m",
            "revenue",
            "--out",
            "summary.md",
        ]);
        assert_eq!(cli.out, Some(PathBuf::from("summary.md")));
    }
}
