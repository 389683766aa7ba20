//! Command implementations for the statement processor CLI.
//!
//! Wires argument validation, logging setup and the library pipeline
//! together, and prints the per-command summaries.

use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::archive::archive_directories;
use crate::cli::args::{Args, ArchiveArgs, Commands, ConvertArgs, MergeArgs};
use crate::cli::input::prompt_confirmation;
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::merge::merge_directories;
use crate::processor::BatchProcessor;

/// Main command runner, dispatching to the subcommand handlers
pub async fn run(args: Args, cancellation: CancellationToken) -> Result<()> {
    match args.command {
        Some(Commands::Convert(convert_args)) => run_convert(convert_args, cancellation).await,
        Some(Commands::Merge(merge_args)) => run_merge(merge_args),
        Some(Commands::Archive(archive_args)) => run_archive(archive_args),
        None => Ok(()),
    }
}

/// Convert statement files into CSV tables
async fn run_convert(args: ConvertArgs, cancellation: CancellationToken) -> Result<()> {
    setup_logging(args.get_log_level())?;
    args.validate()?;

    info!("Starting statement conversion");
    debug!("Command line arguments: {:?}", args);

    if !reset_destination(&args)? {
        println!("Aborted; destination left untouched.");
        return Ok(());
    }

    let mut config = ConvertConfig::default();
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    if args.fail_fast {
        config = config.with_fail_fast();
    }

    let processor = BatchProcessor::new(args.source_path, args.destination_path)
        .with_config(config)
        .with_cancellation(cancellation);
    let stats = processor.process().await?;

    if stats.files_failed > 0 {
        println!(
            "\n{}",
            "Some statements failed to convert:".bright_red().bold()
        );
        for (file, cause) in &stats.errors {
            println!("  {} {}", file.bright_yellow(), cause);
        }
    }

    Ok(())
}

/// Merge per-account tables from the main and sub directories
fn run_merge(args: MergeArgs) -> Result<()> {
    setup_logging(args.get_log_level())?;
    args.validate()?;

    println!("{}", "Merging account tables".bright_green().bold());
    println!("  {} {}", "Main:".bright_cyan(), args.main_path.display());
    println!("  {} {}", "Sub:".bright_cyan(), args.sub_path.display());

    let stats = merge_directories(&args.main_path, &args.sub_path, &args.destination_path)?;

    println!(
        "  {} {} tables, {} sub-account rows",
        "Merged".bright_green(),
        stats.tables_merged.to_string().bright_white().bold(),
        stats.rows_merged.to_string().bright_white().bold()
    );
    Ok(())
}

/// Bundle converted tables into zip archives
fn run_archive(args: ArchiveArgs) -> Result<()> {
    setup_logging(args.get_log_level())?;
    args.validate()?;

    println!("{}", "Archiving account tables".bright_green().bold());

    let archives = archive_directories(&args.main_path, &args.sub_path, &args.destination_path)?;

    println!(
        "  {} {} archives",
        "Wrote".bright_green(),
        archives.len().to_string().bright_white().bold()
    );
    for archive in &archives {
        println!("    {}", archive.display());
    }
    Ok(())
}

/// Clear an existing destination folder, prompting unless forced.
///
/// Returns false when the user declined the prompt.
fn reset_destination(args: &ConvertArgs) -> Result<bool> {
    if !args.destination_path.is_dir() {
        return Ok(true);
    }

    if !args.force {
        let message = format!(
            "Destination {} exists and will be cleared. Continue?",
            args.destination_path.display()
        );
        if !prompt_confirmation(&message, false)? {
            return Ok(false);
        }
    }

    debug!("Clearing destination {}", args.destination_path.display());
    std::fs::remove_dir_all(&args.destination_path)?;
    Ok(true)
}

/// Set up structured logging for a command
fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bill_processor={log_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
