//! Harvester CLI
//!
//! Local execution entry point for batch metadata harvesting.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use harvester::{
    error::{AppError, Result},
    models::{Config, Submission},
    pipeline,
    progress::LogSink,
    services::HttpFetcher,
    storage::{CheckpointStore, CsvExporter, FileCheckpoint},
};

/// Harvester - MDZ metadata batch scraper
#[derive(Parser, Debug)]
#[command(
    name = "harvester",
    version,
    about = "Batch harvester for MDZ digital collections metadata"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Harvest metadata for a list of identifiers
    Run {
        /// File with one raw identifier per line
        ids_file: PathBuf,

        /// Identifiers per batch (also the concurrency width)
        #[arg(long, default_value_t = 10)]
        batch_size: usize,

        /// Pause between batches, in minutes
        #[arg(long, default_value_t = 1)]
        pause: u64,

        /// Keep the existing checkpoint and continue after it
        #[arg(long)]
        resume: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Show checkpoint and export locations
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Read an identifier list file: one identifier per line, blanks skipped.
fn read_ids(path: &PathBuf) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Run {
            ids_file,
            batch_size,
            pause,
            resume,
        } => {
            let ids = read_ids(&ids_file)?;
            if ids.is_empty() {
                return Err(AppError::validation(format!(
                    "No identifiers found in {}",
                    ids_file.display()
                )));
            }
            log::info!("Loaded {} identifiers from {}", ids.len(), ids_file.display());

            let submission = Submission {
                ids,
                batch_size,
                pause_minutes: pause,
            };

            let checkpoint = FileCheckpoint::new(&config.storage.checkpoint_path);
            if !resume {
                // A new submission starts from scratch.
                checkpoint.write(None).await?;
            }

            let fetcher = HttpFetcher::new(&config.http)?;
            let exporter = CsvExporter::new(&config.storage);

            let summary = pipeline::run_harvest(
                &submission,
                &config,
                &fetcher,
                &checkpoint,
                &exporter,
                &LogSink,
            )
            .await?;

            log::info!(
                "Harvest complete: {} identifiers in {} batches, {} failures",
                summary.id_count,
                summary.batch_count,
                summary.failure_count
            );
            log::info!("Export: {}", summary.export_path.display());
            log::info!(
                "Elapsed: {}s",
                (summary.finished_at - summary.started_at).num_seconds()
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} user agents)", config.http.user_agents.len());

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!(
                "Checkpoint file: {}",
                config.storage.checkpoint_path.display()
            );

            let checkpoint = FileCheckpoint::new(&config.storage.checkpoint_path);
            match checkpoint.read().await? {
                Some(id) => log::info!("Last processed identifier: {}", id),
                None => log::info!("No checkpoint found; next run starts from the beginning."),
            }

            log::info!("Export directory: {}", config.storage.export_dir.display());
        }
    }

    log::info!("Done!");

    Ok(())
}
