use anyhow::{Context, Result};
use clap::Parser;
use cotejo::cli::{Cli, ReportFormat};
use cotejo::{analysis, dataset, json_output, report};
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

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = analysis::AnalyzerConfig {
        alpha: args.alpha,
        winsor: args.winsor,
        bootstrap: args.bootstrap,
        seed: args.seed,
    };

    // Reject bad flag values before the input file is touched
    config.validate()?;

    let groups = dataset::load_groups(&args.input, &args.group, &args.metric)?;
    tracing::debug!(
        control = groups.control.len(),
        treatment = groups.treatment.len(),
        dropped = groups.dropped_rows,
        "loaded input table"
    );

    let summary = analysis::analyze(&groups, &config)?;

    let rendered = match args.format {
        ReportFormat::Markdown => report::render_markdown(&summary),
        ReportFormat::Json => json_output::render_json(&summary)?,
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
