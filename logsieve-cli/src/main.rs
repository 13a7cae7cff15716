//! CLI for the logsieve measurement extractor.
//!
//! Processes a device log and writes one `backup_<measurement>.csv` per
//! measurement found, optionally limited to a UTC time range.

use std::path::PathBuf;

use clap::Parser;
use logsieve::{EmitOutcome, ExtractOptions, extract_file};

/// logsieve — extract measurements from device logs into TSDB-compatible CSV files.
#[derive(Parser)]
#[command(name = "logsieve", version, about)]
struct Cli {
    /// Path to the log file (typically /data/logs/solarswitch.log or similar).
    path_to_log: PathBuf,

    /// Only extract records after this UTC timestamp (exclusive),
    /// format yyyy-mm-ddTHH:MM:SS[.ffffff].
    #[arg(short = 's', long)]
    timestamp_from: Option<String>,

    /// Only extract records before this UTC timestamp (exclusive), same format.
    #[arg(short = 'e', long)]
    timestamp_to: Option<String>,

    /// Directory to write the CSV files to.
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,

    /// Print the discovered schema as JSON.
    #[arg(long)]
    print_schema: bool,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExtractOptions {
        timestamp_from: cli.timestamp_from,
        timestamp_to: cli.timestamp_to,
        out_dir: cli.out_dir,
    };

    let report = extract_file(&cli.path_to_log, &options)?;

    if cli.print_schema {
        println!("{}", serde_json::to_string_pretty(&report.schema)?);
    }

    if report.schema.is_empty() {
        println!("No measurements found");
    }

    for outcome in &report.outcomes {
        match outcome {
            EmitOutcome::Written { path, rows } => {
                println!("Wrote {} ({rows} rows)", path.display());
            }
            EmitOutcome::Empty { measurement } => {
                println!("No data to write for measurement {measurement}");
            }
        }
    }

    Ok(())
}
