use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use html2csv::{ExportOptions, ExtractOptions, ExtractionReport, html_file_to_csv};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "html2csv",
    version,
    about = "Write every table of an HTML file to table_<n>.csv in the current directory"
)]
struct Cli {
    /// Input HTML file path.
    input: PathBuf,
}

fn log_report(report: &ExtractionReport) {
    tracing::info!(
        tables = report.table_count,
        files = report.files.len(),
        "export finished"
    );
    for warning in &report.warnings {
        tracing::info!(
            code = ?warning.code,
            source_table = ?warning.source_table,
            "{}",
            warning.message
        );
    }
}

fn run(cli: &Cli) -> Result<ExtractionReport> {
    html_file_to_csv(
        &cli.input,
        &ExtractOptions::default(),
        &ExportOptions::default(),
    )
    .with_context(|| format!("failed to export tables from '{}'", cli.input.display()))
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("html2csv=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let args = std::env::args_os().collect::<Vec<_>>();
    println!("{args:?}");

    let cli = Cli::parse_from(args);
    match run(&cli) {
        Ok(report) => {
            log_report(&report);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
