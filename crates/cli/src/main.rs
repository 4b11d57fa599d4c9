// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod sink;
mod snapshot;

use clap::{Parser, Subcommand};
use grua_import::{
    CancellationToken, ImportConfig, ImportOrchestrator, ImportOutcome, ProgressEvent,
    RetryPolicy, ValidationResult, template_string,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::CliError;
use crate::sink::{JsonLinesCreator, stored_folios};
use crate::snapshot::SnapshotFile;

/// Grua Import - bulk loading of towing service orders from CSV
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the import template
    Template {
        /// Include two example rows
        #[arg(long)]
        examples: bool,

        /// Output file. Writes to stdout if not provided.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a file without creating anything
    Preview {
        /// The CSV file to import
        #[arg(short, long)]
        file: PathBuf,

        /// JSON snapshot of clients, cranes, operators and existing folios
        #[arg(short, long)]
        snapshots: PathBuf,

        /// Column delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
    },

    /// Validate a file and create every valid record
    Run {
        /// The CSV file to import
        #[arg(short, long)]
        file: PathBuf,

        /// JSON snapshot of clients, cranes, operators and existing folios
        #[arg(short, long)]
        snapshots: PathBuf,

        /// JSON-lines file that receives the created records
        #[arg(short, long)]
        output: PathBuf,

        /// Column delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Attempts per record before it counts as failed
        #[arg(long, default_value_t = 1)]
        retries: u32,

        /// Pause between attempts, in milliseconds
        #[arg(long, default_value_t = 500)]
        retry_backoff_ms: u64,
    },
}

fn delimiter_byte(delimiter: char) -> Result<u8, CliError> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(CliError::InvalidDelimiter(delimiter))
}

async fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| CliError::io(path, e))
}

fn log_progress(event: ProgressEvent) {
    debug!("{}: {}/{} rows", event.stage, event.processed, event.total);
}

fn print_validation(validation: &ValidationResult) {
    println!(
        "Filas: {} total, {} válidas, {} con error, {} advertencias",
        validation.total_rows,
        validation.valid_count,
        validation.error_count,
        validation.warning_count
    );
    for err in &validation.errors {
        println!("  error: {err}");
    }
    for warning in &validation.warnings {
        println!("  advertencia: {warning}");
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let rendered: String =
        serde_json::to_string_pretty(value).map_err(|e| CliError::json("<stdout>", e))?;
    println!("{rendered}");
    Ok(())
}

async fn template(
    examples: bool,
    output: Option<&Path>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let rendered: String = template_string(examples)?;
    match output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .map_err(|e| CliError::io(path, e))?;
            info!("Template written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(ExitCode::SUCCESS)
}

async fn preview(
    file: &Path,
    snapshots: &Path,
    delimiter: char,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config: ImportConfig = ImportConfig::default().with_delimiter(delimiter_byte(delimiter)?);
    let snapshot: SnapshotFile = SnapshotFile::load(snapshots).await?;
    let input: Vec<u8> = read_input(file).await?;

    let orchestrator: ImportOrchestrator = ImportOrchestrator::new(config);
    let validation: ValidationResult = orchestrator.validate_only(
        &input,
        &snapshot.existing_folios,
        &snapshot.references(),
        &log_progress,
    )?;

    if json {
        print_json(&validation)?;
    } else {
        print_validation(&validation);
    }

    Ok(if validation.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(
    file: &Path,
    snapshots: &Path,
    output: &Path,
    delimiter: char,
    retries: u32,
    retry_backoff_ms: u64,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config: ImportConfig = ImportConfig::default()
        .with_delimiter(delimiter_byte(delimiter)?)
        .with_retry(RetryPolicy {
            max_attempts: retries,
            backoff: Duration::from_millis(retry_backoff_ms),
        });

    let mut snapshot: SnapshotFile = SnapshotFile::load(snapshots).await?;
    let stored: Vec<String> = stored_folios(output).await?;
    if !stored.is_empty() {
        info!(
            "{} folios already stored in {}",
            stored.len(),
            output.display()
        );
    }
    snapshot.extend_existing_folios(stored);

    let input: Vec<u8> = read_input(file).await?;
    let creator: JsonLinesCreator = JsonLinesCreator::open(output).await?;

    let cancel: CancellationToken = CancellationToken::new();
    let signal_token: CancellationToken = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current record");
            signal_token.cancel();
        }
    });

    let orchestrator: ImportOrchestrator =
        ImportOrchestrator::new(config).with_cancellation(cancel);
    let outcome: ImportOutcome = orchestrator
        .run(
            &input,
            &snapshot.existing_folios,
            &snapshot.references(),
            &creator,
            &log_progress,
        )
        .await?;

    if json {
        print_json(&outcome)?;
    } else {
        print_validation(&outcome.validation);
        println!("{}", outcome.upload.message);
        for failure in &outcome.upload.failures {
            println!(
                "  fila {}, folio {}: {}",
                failure.row_index + 1,
                failure.folio,
                failure.error
            );
        }
        info!("Records written to {}", creator.path().display());
    }

    Ok(if outcome.is_complete_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let result: Result<ExitCode, Box<dyn std::error::Error>> = match args.command {
        Command::Template { examples, output } => template(examples, output.as_deref()).await,
        Command::Preview {
            file,
            snapshots,
            delimiter,
        } => preview(&file, &snapshots, delimiter, args.json).await,
        Command::Run {
            file,
            snapshots,
            output,
            delimiter,
            retries,
            retry_backoff_ms,
        } => {
            run(
                &file,
                &snapshots,
                &output,
                delimiter,
                retries,
                retry_backoff_ms,
                args.json,
            )
            .await
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}
