use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nexus::core::CodebaseAnalyzer;
use nexus::formatters::JsonGraphFormatter;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "nexus",
    version,
    about = "Nexus Parser - analyze code dependencies and generate a graph JSON file"
)]
struct Cli {
    /// Path to the source code directory to analyze
    #[arg(short, long, value_name = "PATH")]
    directory: PathBuf,

    /// Output path for the generated graph JSON file
    #[arg(short, long, value_name = "FILE", default_value = "graph.json")]
    output: PathBuf,

    /// Worker threads for parsing (0 = one per CPU)
    #[arg(short = 'j', long, value_name = "N", default_value_t = 0)]
    threads: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

/// Logs go to stderr so they never mix with the graph output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        directory,
        output,
        threads,
        verbose: _,
    } = cli;

    info!("Nexus Parser - Dependency Graph Generator");
    info!("Target directory: {}", directory.display());
    info!("Output file: {}", output.display());

    let analyzer = CodebaseAnalyzer::new()
        .context("Failed to initialize parser")?
        .with_threads(threads);
    let analysis = analyzer
        .analyze(&directory)
        .with_context(|| format!("Analysis of {} failed", directory.display()))?;

    analysis.report.log_summary();

    JsonGraphFormatter::new()
        .format_to_file(&analysis.graph, &output)
        .context("Could not write graph")?;
    info!("Successfully wrote graph to: {}", output.display());

    Ok(())
}
