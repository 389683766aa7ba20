//! CSV writing for converted statement tables.
//!
//! Output files are named `{account}_{site}_{kind}_{date}_{datetime}.csv`
//! so downstream merge and archive tooling can match them per kind.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::constants::{FILE_STAMP_LONG, FILE_STAMP_SHORT};
use crate::error::Result;
use crate::models::{OutputTable, SegmentKind};

/// Timestamp pair embedded in every output file name of one statement
#[derive(Debug, Clone)]
pub struct FileStamp {
    pub short: String,
    pub long: String,
}

impl FileStamp {
    /// Capture the current local time
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            short: now.format(FILE_STAMP_SHORT).to_string(),
            long: now.format(FILE_STAMP_LONG).to_string(),
        }
    }
}

/// Build the output file name for one table of one statement
pub fn table_file_name(
    account_no: &str,
    site_tag: &str,
    kind: SegmentKind,
    stamp: &FileStamp,
) -> String {
    format!(
        "{}_{}_{}_{}_{}.csv",
        account_no,
        site_tag,
        kind.file_tag(),
        stamp.short,
        stamp.long
    )
}

/// Persist an output table as CSV, header row first
pub fn write_table(path: &Path, table: &OutputTable) -> Result<PathBuf> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;

    debug!(
        "Wrote {} data rows to {}",
        table.data_row_count(),
        path.display()
    );
    Ok(path.to_path_buf())
}
