//! Merging of per-account CSV tables from two source directories.
//!
//! A "main" directory holds the primary account's tables and a "sub"
//! directory the child accounts'. Balances are concatenated under the
//! main file's name. Positions and trades take their header from the
//! first sub file and normalize each sub row on the way through: US-style
//! trade dates, lowercased exchange and commodity codes, a "c" contract
//! prefix, and numeric cleanup of price and unrealized P/L columns.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::constants::{ISO_DATE_FORMAT, MERGED_ROW_COLUMNS, US_DATE_FORMAT};
use crate::error::{BillError, Result};
use crate::models::SegmentKind;

/// Outcome of a merge run
#[derive(Debug, Default)]
pub struct MergeStats {
    /// Tables written to the destination
    pub tables_merged: usize,
    /// Data rows contributed by sub-account files
    pub rows_merged: usize,
}

/// Merge the per-kind CSV tables found in `main_dir` and `sub_dir` into
/// `destination`. Kinds with no main file are skipped with a warning.
pub fn merge_directories(main_dir: &Path, sub_dir: &Path, destination: &Path) -> Result<MergeStats> {
    std::fs::create_dir_all(destination)?;

    let mut stats = MergeStats::default();
    for kind in SegmentKind::ALL {
        let main_files = matching_files(main_dir, kind)?;
        let sub_files = matching_files(sub_dir, kind)?;

        let Some(first_main) = main_files.first() else {
            warn!("No {} files found in {}", kind.file_tag(), main_dir.display());
            continue;
        };

        let merged = match kind {
            SegmentKind::Balances => merge_balances(first_main, &sub_files)?,
            SegmentKind::Positions | SegmentKind::Trades => {
                if sub_files.is_empty() {
                    warn!("No {} files found in {}", kind.file_tag(), sub_dir.display());
                    continue;
                }
                merge_contract_tables(kind, &sub_files)?
            }
        };

        let rows_from_subs = merged.len().saturating_sub(main_rows(kind, first_main)?);
        let output = destination.join(output_name(first_main));
        write_rows(&output, &merged)?;
        info!(
            "Merged {} rows into {}",
            merged.len().saturating_sub(1),
            output.display()
        );

        stats.tables_merged += 1;
        stats.rows_merged += rows_from_subs;
    }

    Ok(stats)
}

/// Balances keep the main file's rows and append each sub file's data rows
fn merge_balances(main_file: &Path, sub_files: &[PathBuf]) -> Result<Vec<Vec<String>>> {
    let mut rows = read_csv_rows(main_file)?;
    for sub_file in sub_files {
        let sub_rows = read_csv_rows(sub_file)?;
        rows.extend(sub_rows.into_iter().skip(1));
    }
    Ok(rows)
}

/// Positions/trades are rebuilt from the sub files alone, header first
fn merge_contract_tables(kind: SegmentKind, sub_files: &[PathBuf]) -> Result<Vec<Vec<String>>> {
    let first = read_csv_rows(&sub_files[0])?;
    let header = first.into_iter().next().ok_or_else(|| BillError::MergeFailed {
        reason: format!("{} has no header row", sub_files[0].display()),
    })?;

    let mut rows = vec![header];
    for sub_file in sub_files {
        debug!("Merging {}", sub_file.display());
        for row in read_csv_rows(sub_file)?.into_iter().skip(1) {
            rows.push(normalize_merged_row(kind, row)?);
        }
    }
    Ok(rows)
}

/// Apply the per-kind column transforms to one merged data row
fn normalize_merged_row(kind: SegmentKind, mut row: Vec<String>) -> Result<Vec<String>> {
    if row.len() < MERGED_ROW_COLUMNS {
        return Err(BillError::ColumnCount {
            segment: format!("merged {}", kind.file_tag()),
            expected: MERGED_ROW_COLUMNS,
            found: row.len(),
        });
    }

    if let Ok(date) = NaiveDate::parse_from_str(&row[1], ISO_DATE_FORMAT) {
        row[1] = date.format(US_DATE_FORMAT).to_string();
    }
    row[5] = row[5].to_lowercase();
    row[6] = format!("c{}", row[6]);
    row[17] = row[17].to_lowercase();

    match kind {
        SegmentKind::Positions => {
            // Unparseable amounts collapse to zero, as in the source data.
            let price: f64 = row[10].parse().unwrap_or_default();
            row[10] = format!("{price:.2}");
            let unrealised: f64 = row[13].replace(',', "").parse().unwrap_or_default();
            row[13] = format!("{unrealised:.0}");
        }
        SegmentKind::Trades => {
            match row[15].to_lowercase().as_str() {
                "sale" => row[15] = "0".to_string(),
                "buy" => row[15] = "1".to_string(),
                _ => {}
            }
        }
        SegmentKind::Balances => {}
    }

    Ok(row)
}

/// Rows the main file contributes to the merged output
fn main_rows(kind: SegmentKind, main_file: &Path) -> Result<usize> {
    match kind {
        SegmentKind::Balances => Ok(read_csv_rows(main_file)?.len()),
        // Positions/trades drop the main rows and keep only the header.
        SegmentKind::Positions | SegmentKind::Trades => Ok(1),
    }
}

/// CSV files in `dir` whose name carries the kind's pattern, sorted
fn matching_files(dir: &Path, kind: SegmentKind) -> Result<Vec<PathBuf>> {
    let pattern = dir
        .join(format!("*{}*.csv", kind.file_pattern()))
        .to_string_lossy()
        .to_string();
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| BillError::MergeFailed {
            reason: format!("invalid file pattern {pattern:?}: {e}"),
        })?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

fn output_name(main_file: &Path) -> String {
    main_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "merged.csv".to_string())
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
