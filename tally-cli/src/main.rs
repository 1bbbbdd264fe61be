use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tally_ingest::emit::{create_output, write_csv};
use tally_ingest::{Batch, PdfReader};
use tracing_subscriber::EnvFilter;

mod config;
mod report;

use report::ConsoleReport;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    about = "Extract transactions from bank and card statement PDFs into one CSV"
)]
struct Cli {
    /// Directory holding the statement PDFs (not searched recursively)
    input_dir: PathBuf,

    /// CSV file to write
    output_csv: PathBuf,
}

/// Log filter from TALLY_LOG, then RUST_LOG, else warnings only.
/// Logs go to stderr; stdout carries the progress report.
fn setup_logging() {
    let filter = EnvFilter::try_from_env("TALLY_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.input_dir)?;
    tracing::debug!(?cfg, "loaded config");

    // An unreadable input directory must not truncate an existing output.
    tally_ingest::list_statements(&cli.input_dir)?;

    // Fail before touching any statement if the destination is unusable.
    let out = create_output(&cli.output_csv)?;

    let reader = PdfReader;
    let report = Batch::new(&reader)
        .with_overrides(cfg.overrides)
        .with_skip(cfg.skip)
        .run_with(&cli.input_dir, &mut ConsoleReport)?;

    write_csv(out, &report.records)
        .with_context(|| format!("writing {}", cli.output_csv.display()))?;

    let failed = report.failed().count();
    if failed > 0 {
        tracing::warn!(failed, "some statements could not be read");
    }

    println!(
        "\nTotal: {} transactions -> {}",
        report.total(),
        cli.output_csv.display()
    );

    Ok(())
}
