//! Batch conversion driver.
//!
//! Orchestrates the statement conversion workflow: discover statement
//! files, convert them concurrently into the three destination tables,
//! and report per-file outcomes. Conversion itself is pure with respect
//! to its inputs; all concurrency lives at the file-batch level.

pub mod discovery;
pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use self::discovery::FileDiscovery;
use self::writer::{FileStamp, table_file_name, write_table};

use crate::config::ConvertConfig;
use crate::convert::{map_balances, map_positions, map_trades};
use crate::error::{BillError, Result};
use crate::header::parse_bill_header;
use crate::models::{OutputTable, ProcessingStats, SegmentKind};

/// Main processor for statement batch conversion
#[derive(Debug)]
pub struct BatchProcessor {
    source_path: PathBuf,
    destination_path: PathBuf,
    config: ConvertConfig,
    file_discovery: FileDiscovery,
    cancellation: CancellationToken,
}

impl BatchProcessor {
    /// Create a new batch processor
    pub fn new(source_path: PathBuf, destination_path: PathBuf) -> Self {
        Self {
            file_discovery: FileDiscovery::new(source_path.clone()),
            source_path,
            destination_path,
            config: ConvertConfig::default(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ConvertConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a cancellation token; cancelled files count as failures
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Convert every statement file in the source folder.
    ///
    /// Per-file errors are collected and the batch continues unless
    /// `fail_fast` is configured, in which case the first error aborts
    /// the run. Outputs already written for other files are untouched
    /// either way.
    pub async fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        println!("{}", "Starting statement conversion".bright_green().bold());
        println!(
            "  {} {}",
            "Source:".bright_cyan(),
            self.source_path.display()
        );
        println!(
            "  {} {}",
            "Destination:".bright_cyan(),
            self.destination_path.display()
        );

        let files = self.file_discovery.discover_statement_files()?;
        println!(
            "  {} {} statement files",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold()
        );

        let mut stats = ProcessingStats::default();
        if files.is_empty() {
            stats.processing_time_ms = start_time.elapsed().as_millis();
            return Ok(stats);
        }

        fs::create_dir_all(&self.destination_path).await?;

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Converting statements");

        let workers = self.config.workers.clamp(1, files.len());
        debug!("Converting {} files with {} workers", files.len(), workers);

        let results: Vec<(PathBuf, Result<Vec<PathBuf>>)> = stream::iter(files)
            .map(|path| {
                let destination = self.destination_path.clone();
                let config = self.config.clone();
                let cancellation = self.cancellation.clone();
                let pb = pb.clone();
                async move {
                    if cancellation.is_cancelled() {
                        return (
                            path,
                            Err(BillError::Interrupted {
                                reason: "conversion cancelled".to_string(),
                            }),
                        );
                    }

                    if let Some(file_name) = path.file_name() {
                        pb.set_message(format!("Converting: {}", file_name.to_string_lossy()));
                    }
                    let result = convert_statement_file(&path, &destination, &config).await;
                    pb.inc(1);
                    (path, result)
                }
            })
            .buffer_unordered(workers)
            .collect()
            .await;
        pb.finish_and_clear();

        let mut first_error = None;
        for (path, result) in results {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());

            match result {
                Ok(written) => {
                    info!("Converted {} into {} tables", file_name, written.len());
                    stats.files_processed += 1;
                    stats.tables_written += written.len();
                }
                Err(e) => {
                    error!("Failed to convert {}: {:#}", file_name, e);
                    stats.files_failed += 1;
                    stats.errors.push((file_name, e.to_string()));
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if self.config.fail_fast {
            if let Some(error) = first_error {
                return Err(error);
            }
        }

        stats.processing_time_ms = start_time.elapsed().as_millis();
        self.print_summary(&stats);
        Ok(stats)
    }

    fn print_summary(&self, stats: &ProcessingStats) {
        println!("\n{}", "Conversion Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Files converted:".bright_cyan(),
            stats.files_processed.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Tables written:".bright_cyan(),
            stats.tables_written.to_string().bright_white()
        );
        if stats.files_failed > 0 {
            println!(
                "  {} {}",
                "Files failed:".bright_red(),
                stats.files_failed.to_string().bright_red().bold()
            );
        }
    }
}

/// Convert a single statement file into its three CSV tables
async fn convert_statement_file(
    path: &Path,
    destination: &Path,
    config: &ConvertConfig,
) -> Result<Vec<PathBuf>> {
    let bytes = fs::read(path).await?;

    let task_path = path.to_path_buf();
    let destination = destination.to_path_buf();
    let config = config.clone();
    task::spawn_blocking(move || convert_statement(&bytes, &task_path, &destination, &config))
        .await
        .map_err(|e| BillError::ProcessingFailed {
            path: path.to_path_buf(),
            reason: format!("conversion task aborted: {e}"),
        })?
}

/// Pure conversion of decoded statement bytes into written tables
fn convert_statement(
    bytes: &[u8],
    path: &Path,
    destination: &Path,
    config: &ConvertConfig,
) -> Result<Vec<PathBuf>> {
    let content = reader::decode_statement(bytes);

    let bill = parse_bill_header(&content).map_err(|e| BillError::HeaderParsingFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let stamp = FileStamp::now();
    let tables: [(SegmentKind, OutputTable); 3] = [
        (
            SegmentKind::Balances,
            map_balances(&bill, &content, config),
        ),
        (
            SegmentKind::Positions,
            map_positions(&bill, &content, config)?,
        ),
        (SegmentKind::Trades, map_trades(&bill, &content, config)?),
    ];

    let mut written = Vec::with_capacity(tables.len());
    for (kind, table) in &tables {
        let file_name = table_file_name(&bill.account_no, &config.site_tag, *kind, &stamp);
        written.push(write_table(&destination.join(file_name), table)?);
    }

    Ok(written)
}
