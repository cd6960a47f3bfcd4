use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use mp3meta::model::{FileOutcome, Report};
use mp3meta::sync;
use mp3meta::{Result, ToolError};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<i32> {
    let print = |outcome: &FileOutcome| println!("{outcome}");
    let (report, args) = match cli.command {
        Command::Export(args) => (sync::export_with(&args.folder, &args.csv, print)?, args),
        Command::Import(args) => (sync::import_with(&args.folder, &args.csv, print)?, args),
    };

    println!("{}", report.summary());
    finish(&report, &args)
}

/// Writes the optional JSON report and picks the process exit code.
fn finish(report: &Report, args: &TransferArgs) -> Result<i32> {
    if let Some(path) = &args.report {
        save_report(path, report)?;
    }

    Ok(if args.strict && report.has_failures() {
        1
    } else {
        0
    })
}

fn save_report(path: &Path, report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Parser)]
#[command(
    name = "mp3meta",
    author,
    version,
    about = "MP3 metadata tool (UTF-8 safe, ideal for Greek or multilingual text)",
    long_about = "MP3 metadata tool (UTF-8 safe, ideal for Greek or multilingual text)\n\n\
        Exports the track number, title, artist, album artist and album of every\n\
        MP3 file in a folder into a CSV file, or updates those tags from a CSV file.\n\n\
        Examples:\n  \
        mp3meta export --folder ./music --csv metadata.csv\n  \
        mp3meta import --folder ./music --csv metadata.csv"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export metadata to CSV.
    Export(TransferArgs),
    /// Import metadata from CSV.
    Import(TransferArgs),
}

#[derive(clap::Args)]
struct TransferArgs {
    /// Folder with MP3 files.
    #[arg(long)]
    folder: PathBuf,

    /// CSV file to write on export, or to read on import.
    #[arg(long)]
    csv: PathBuf,

    /// Also write the per-file outcomes as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Exit with a non-zero status when any file fails.
    #[arg(long)]
    strict: bool,
}
