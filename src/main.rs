//! Thin command-line wrapper around the pdb-dl library.
//!
//! Maps the two positional inputs (accession source, optional format) onto
//! [`StructureFetcher`], prints one status line per identifier, and exits
//! nonzero unless every identifier succeeded.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use pdb_dl::{Config, FileFormat, StructureFetcher, collect_identifiers};

/// Download PDB or mmCIF structure files by accession code
#[derive(Debug, Parser)]
#[command(name = "pdb-dl", version, about)]
struct Cli {
    /// Accession code, or path to a file with one code per line
    ids: String,

    /// Output format: "pdb" (default) or "cif"
    format: Option<String>,

    /// Directory to write downloaded files into
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Archive endpoint root (override for mirrors or testing)
    #[arg(long)]
    endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> pdb_dl::Result<bool> {
    // A bad format selector is a configuration error: reject it before any
    // per-identifier work begins.
    let format = match cli.format {
        Some(ref value) => FileFormat::from_str(value)?,
        None => FileFormat::Pdb,
    };

    let mut config = Config {
        download_dir: cli.output_dir,
        request_timeout_secs: cli.timeout,
        ..Config::default()
    };
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let fetcher = StructureFetcher::new(config).await?;
    let identifiers = collect_identifiers(&cli.ids).await?;
    let report = fetcher.fetch_all(&identifiers, format).await;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(path) => println!("{} retrieved successfully.", path.display()),
            Err(e) => println!(
                "ERROR! {} could not be retrieved: {}",
                outcome.identifier, e
            ),
        }
    }

    Ok(report.all_succeeded())
}
